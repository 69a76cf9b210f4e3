use crate::commands::{budget, data, debt, overview, savings, settings, watch};
use crate::config::Config;
use crate::core::operations::AppDataController;
use crate::storage::FileBackend;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "budget-tracker")]
#[command(about = "Track monthly income, budget categories, savings goals and debt")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub fn execute(self, config: &Config, controller: &mut AppDataController<FileBackend>) -> Result<()> {
        match self {
            Commands::Overview => overview::handle_overview_command(controller),
            Commands::Budget(args) => budget::handle_budget_command(controller, args.command),
            Commands::Savings(args) => savings::handle_savings_command(controller, args.command),
            Commands::Debt(args) => debt::handle_debt_command(controller, args.command),
            Commands::Settings(args) => settings::handle_settings_command(config, controller, args.command),
            Commands::Export(args) => data::handle_export_command(config, controller, &args),
            Commands::Import(args) => data::handle_import_command(controller, &args),
            Commands::Reset(args) => data::handle_reset_command(controller, &args),
            Commands::Watch => watch::handle_watch_command(config, controller),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show income, spending, savings and debt at a glance
    Overview,

    /// Manage monthly income and budget categories
    Budget(BudgetArgs),

    /// Manage savings goals
    Savings(SavingsArgs),

    /// Manage debt accounts
    Debt(DebtArgs),

    /// Show or change settings
    Settings(SettingsArgs),

    /// Export all data to a dated JSON backup
    Export(ExportArgs),

    /// Replace all data with a JSON backup
    Import(ImportArgs),

    /// Delete all data and start over
    Reset(ResetArgs),

    /// Follow changes made by other processes and redraw the overview
    Watch,
}

// ========== Budget ==========

#[derive(Args)]
pub struct BudgetArgs {
    #[command(subcommand)]
    pub command: Option<BudgetCommands>,
}

#[derive(Subcommand, Clone)]
pub enum BudgetCommands {
    /// List categories (default)
    List,

    /// Set monthly income
    Income {
        #[arg(allow_negative_numbers = true)]
        amount: String,
    },

    /// Add a category
    Add(CategoryAddArgs),

    /// Edit a category
    Edit(CategoryEditArgs),

    /// Remove a category
    Remove {
        #[arg(help = "Category ID")]
        id: String,
    },
}

#[derive(Args, Clone)]
pub struct CategoryAddArgs {
    pub name: String,

    #[arg(short, long, allow_negative_numbers = true, default_value = "0")]
    pub planned: String,

    #[arg(short, long, allow_negative_numbers = true, default_value = "0")]
    pub spent: String,
}

#[derive(Args, Clone)]
pub struct CategoryEditArgs {
    #[arg(help = "Category ID")]
    pub id: String,

    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub planned: Option<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub spent: Option<String>,
}

// ========== Savings ==========

#[derive(Args)]
pub struct SavingsArgs {
    #[command(subcommand)]
    pub command: Option<SavingsCommands>,
}

#[derive(Subcommand, Clone)]
pub enum SavingsCommands {
    /// List savings goals (default)
    List,

    /// Add a savings goal
    Add(SavingsAddArgs),

    /// Edit a savings goal
    Edit(SavingsEditArgs),

    /// Remove a savings goal
    Remove {
        #[arg(help = "Goal ID")]
        id: String,
    },
}

#[derive(Args, Clone)]
pub struct SavingsAddArgs {
    pub name: String,

    #[arg(short, long, allow_negative_numbers = true, default_value = "0")]
    pub target: String,

    #[arg(short, long, allow_negative_numbers = true, default_value = "0")]
    pub current: String,

    #[arg(short, long, help = "Target date (YYYY-MM-DD)")]
    pub date: Option<String>,
}

#[derive(Args, Clone)]
pub struct SavingsEditArgs {
    #[arg(help = "Goal ID")]
    pub id: String,

    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub target: Option<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub current: Option<String>,

    #[arg(short, long, help = "Target date (YYYY-MM-DD, empty to clear)")]
    pub date: Option<String>,
}

// ========== Debt ==========

#[derive(Args)]
pub struct DebtArgs {
    #[command(subcommand)]
    pub command: Option<DebtCommands>,
}

#[derive(Subcommand, Clone)]
pub enum DebtCommands {
    /// List debt accounts (default)
    List,

    /// Add a debt account
    Add(DebtAddArgs),

    /// Edit a debt account
    Edit(DebtEditArgs),

    /// Remove a debt account
    Remove {
        #[arg(help = "Account ID")]
        id: String,
    },
}

#[derive(Args, Clone)]
pub struct DebtAddArgs {
    pub name: String,

    #[arg(short, long, allow_negative_numbers = true, default_value = "0")]
    pub balance: String,

    #[arg(short, long, allow_negative_numbers = true, default_value = "0", help = "Interest rate in percent")]
    pub rate: String,

    #[arg(short, long, allow_negative_numbers = true, default_value = "0")]
    pub min_payment: String,
}

#[derive(Args, Clone)]
pub struct DebtEditArgs {
    #[arg(help = "Account ID")]
    pub id: String,

    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub balance: Option<String>,

    #[arg(short, long, allow_negative_numbers = true, help = "Interest rate in percent")]
    pub rate: Option<String>,

    #[arg(short, long, allow_negative_numbers = true)]
    pub min_payment: Option<String>,
}

// ========== Settings and data ==========

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

#[derive(Subcommand, Clone)]
pub enum SettingsCommands {
    /// Show current settings (default)
    Show,

    /// Change the display currency
    Currency {
        #[arg(help = "ISO currency code, e.g. EUR")]
        code: String,
    },
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(long, help = "Directory to write the backup to")]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(help = "Backup file to import")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ResetArgs {
    #[arg(short, long, help = "Skip the confirmation prompt")]
    pub force: bool,
}
