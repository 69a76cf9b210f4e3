use crate::core::operations::AppDataController;
use crate::core::traits::StorageBackend;
use crate::utils::output::OutputStyle;
use anyhow::Result;

pub fn handle_overview_command<B: StorageBackend>(controller: &AppDataController<B>) -> Result<()> {
    OutputStyle::print_overview(controller.data());
    Ok(())
}
