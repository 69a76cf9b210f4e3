// Command handlers: thin views over AppDataController
pub mod budget;    // Income and categories
pub mod savings;   // Savings goals
pub mod debt;      // Debt accounts
pub mod settings;  // Currency and configuration display
pub mod data;      // Export, import and reset
pub mod overview;  // Summary cards
pub mod watch;     // Follow external changes
