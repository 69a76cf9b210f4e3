use crate::cli::{ExportArgs, ImportArgs, ResetArgs};
use crate::config::Config;
use crate::core::operations::AppDataController;
use crate::core::traits::StorageBackend;
use crate::utils::error::{FlowResult, handle_flow};
use crate::utils::interactive::prompt_yes_no;
use crate::utils::output::print_warning;
use anyhow::{Context, Result};

pub fn handle_export_command<B: StorageBackend>(
    config: &Config,
    controller: &AppDataController<B>,
    args: &ExportArgs,
) -> Result<()> {
    let dir = args.dir.clone().unwrap_or_else(|| config.export_dir());
    let path = controller
        .export_to_file(&dir)
        .with_context(|| format!("Failed to export to {}", dir.display()))?;

    handle_flow(FlowResult::Success(format!("Exported to {}", path.display())));
    Ok(())
}

pub fn handle_import_command<B: StorageBackend>(
    controller: &mut AppDataController<B>,
    args: &ImportArgs,
) -> Result<()> {
    if controller.import_from_file(&args.file)? {
        handle_flow(FlowResult::Success(format!(
            "Imported data from {}",
            args.file.display()
        )));
    } else {
        print_warning("Import failed: the file is not a valid budget-tracker backup. Your data was not changed.");
    }
    Ok(())
}

pub fn handle_reset_command<B: StorageBackend>(
    controller: &mut AppDataController<B>,
    args: &ResetArgs,
) -> Result<()> {
    if !args.force {
        print_warning("This deletes your income, categories, savings goals and debt accounts.");
        if !prompt_yes_no("Reset all data?")? {
            handle_flow(FlowResult::Cancelled("Reset cancelled".to_string()));
            return Ok(());
        }
    }

    controller.reset_data();
    handle_flow(FlowResult::Success("All data has been reset".to_string()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{AppData, NewCategory};
    use crate::storage::MemoryBackend;

    #[test]
    fn test_export_then_import_through_commands() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let config = Config::default();
        let mut source = AppDataController::new(MemoryBackend::new());
        source.add_category(NewCategory { name: "Food".into(), planned: 400.0, spent: 35.0 });

        handle_export_command(&config, &source, &ExportArgs { dir: Some(tmp.path().to_path_buf()) })
            .expect("export");
        let file = std::fs::read_dir(tmp.path())
            .expect("list dir")
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .next()
            .expect("backup file");

        let mut target = AppDataController::new(MemoryBackend::new());
        handle_import_command(&mut target, &ImportArgs { file }).expect("import");
        assert_eq!(target.data(), source.data());
    }

    #[test]
    fn test_invalid_backup_leaves_state() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let file = tmp.path().join("bad.json");
        std::fs::write(&file, "{\"foo\":1}").expect("write");

        let mut controller = AppDataController::new(MemoryBackend::new());
        handle_import_command(&mut controller, &ImportArgs { file }).expect("import runs");
        assert_eq!(controller.data(), &AppData::default());
    }

    #[test]
    fn test_forced_reset() {
        let mut controller = AppDataController::new(MemoryBackend::new());
        controller.add_category(NewCategory { name: "Fun".into(), planned: 50.0, spent: 0.0 });

        handle_reset_command(&mut controller, &ResetArgs { force: true }).expect("reset");
        assert_eq!(controller.data(), &AppData::default());
    }
}
