//! budget-tracker - personal finance tracking from the terminal
//!
//! This library provides the application state (settings, monthly budget,
//! savings goals and debt accounts), its normalization, and a persistent
//! store that stays in sync with other processes sharing the same data.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export core types and traits for easier use
pub use crate::core::{
    data::{AppData, Budget, Category, DebtAccount, SavingsGoal, Settings, Summary, normalize},
    operations::{AppDataController, STORAGE_KEY},
    traits::{Entity, StorageBackend},
};
pub use crate::storage::{FileBackend, MemoryBackend, PersistentStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
