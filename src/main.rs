use anyhow::Result;
use clap::Parser;

use budget_tracker::cli::Cli;
use budget_tracker::config::Config;
use budget_tracker::core::operations::AppDataController;
use budget_tracker::utils::error::report_error;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli) {
        report_error(&err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(cli: Cli) -> Result<()> {
    // Ensure configuration exists and load it
    let config = match &cli.config {
        Some(config_path) => Config::load_custom(config_path)?,
        None => {
            Config::ensure_config_exists()?;
            Config::load()?
        }
    };

    if !config.general.color {
        colored::control::set_override(false);
    }

    log::debug!("Using data directory {}", config.general.data_dir.display());
    let mut controller = AppDataController::from_config(&config);
    cli.command.execute(&config, &mut controller)
}
