use crate::config::Config;
use crate::core::operations::AppDataController;
use crate::storage::FileBackend;
use crate::utils::output::OutputStyle;
use anyhow::{Context, Result};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Redraw the overview whenever another process writes the data file.
/// Runs until the process is interrupted.
pub fn handle_watch_command(config: &Config, controller: &mut AppDataController<FileBackend>) -> Result<()> {
    controller
        .watch(config.watch_debounce())
        .with_context(|| format!("Failed to watch {}", config.general.data_dir.display()))?;

    controller.subscribe(|data| {
        println!("\n{}", OutputStyle::muted("↻ Data changed in another window"));
        OutputStyle::print_overview(data);
    });

    OutputStyle::print_overview(controller.data());
    println!("\n{}", OutputStyle::muted("Watching for changes, press Ctrl+C to stop"));

    loop {
        controller.wait_for_external_change(POLL_INTERVAL);
    }
}
