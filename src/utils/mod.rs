pub mod error;
pub mod export;
pub mod format;
pub mod id;
pub mod interactive;
pub mod output;

pub use error::*;
pub use format::*;
