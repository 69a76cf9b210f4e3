use crate::cli::SettingsCommands;
use crate::config::Config;
use crate::core::data::SettingsPatch;
use crate::core::operations::AppDataController;
use crate::core::traits::StorageBackend;
use crate::utils::error::{AppError, FlowResult, handle_flow};
use crate::utils::format::{SUPPORTED_CURRENCIES, is_supported_currency};
use crate::utils::output::OutputStyle;
use anyhow::Result;

pub fn handle_settings_command<B: StorageBackend>(
    config: &Config,
    controller: &mut AppDataController<B>,
    command: Option<SettingsCommands>,
) -> Result<()> {
    match command.unwrap_or(SettingsCommands::Show) {
        SettingsCommands::Show => handle_show(config, controller),
        SettingsCommands::Currency { code } => handle_currency(controller, &code),
    }
}

fn handle_show<B: StorageBackend>(config: &Config, controller: &AppDataController<B>) -> Result<()> {
    OutputStyle::print_header("⚙️  Settings");

    let currency = controller.data().settings.currency_code();
    let label = SUPPORTED_CURRENCIES
        .iter()
        .find(|(code, _, _)| *code == currency)
        .map(|(code, name, _)| format!("{} ({})", name, code))
        .unwrap_or_else(|| currency.to_string());

    OutputStyle::print_field_colored("Currency", &label, OutputStyle::amount);
    OutputStyle::print_field_colored(
        "Data directory",
        &config.general.data_dir.display().to_string(),
        OutputStyle::info,
    );
    OutputStyle::print_field_colored("Storage key", &config.general.storage_key, OutputStyle::info);
    OutputStyle::print_field_colored(
        "Export directory",
        &config.export_dir().display().to_string(),
        OutputStyle::info,
    );
    OutputStyle::print_field_colored(
        "Config file",
        &Config::config_file_path().display().to_string(),
        OutputStyle::muted,
    );
    Ok(())
}

fn handle_currency<B: StorageBackend>(controller: &mut AppDataController<B>, code: &str) -> Result<()> {
    let code = code.trim().to_uppercase();
    if !is_supported_currency(&code) {
        let supported: Vec<&str> = SUPPORTED_CURRENCIES.iter().map(|(c, _, _)| *c).collect();
        return Err(AppError::Validation(format!(
            "Unsupported currency '{}'. Choose one of: {}",
            code,
            supported.join(", ")
        ))
        .into());
    }

    controller.update_settings(SettingsPatch {
        currency: Some(code.clone()),
    });
    handle_flow(FlowResult::Success(format!("Currency set to {}", code)));
    Ok(())
}
