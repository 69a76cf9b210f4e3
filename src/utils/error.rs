use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub enum FlowResult {
    NotFound {
        item_type: String,
        search_term: String,
    },
    Cancelled(String),
    Success(String),
}

pub fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<AppError>() {
        Some(AppError::Validation(msg)) => {
            eprintln!("⚠️  {}", OutputStyle::warning(msg));
        }
        Some(AppError::Storage(msg)) => {
            eprintln!("💾 {}", OutputStyle::error(&format!("Storage: {}", msg)));
        }
        Some(AppError::Io(msg)) | Some(AppError::System(msg)) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
        None => {
            eprintln!("❌ {}", OutputStyle::error(&format!("{:#}", err)));
        }
    }
}

pub fn handle_flow(flow: FlowResult) {
    match flow {
        FlowResult::NotFound {
            item_type,
            search_term,
        } => {
            let msg = format!("{} '{}' not found", item_type, search_term);
            println!("⚠️  {}", OutputStyle::warning(&msg));
        }
        FlowResult::Cancelled(msg) => {
            println!("⏹️  {}", OutputStyle::muted(&msg));
        }
        FlowResult::Success(msg) => {
            println!("✅ {}", OutputStyle::success(&msg));
        }
    }
}
