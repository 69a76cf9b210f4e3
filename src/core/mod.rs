//! Core business logic layer
//!
//! Data model and normalization, the storage traits, and the controller
//! that owns the application state.

pub mod data;
pub mod operations;
pub mod traits;
