//! Key-value persistence with external change notification

pub mod backend;
pub mod store;
pub mod watcher;

pub use backend::{FileBackend, MemoryBackend};
pub use store::{PersistentStore, StorageEvent, read, write};
pub use watcher::StorageWatcher;
