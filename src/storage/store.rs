use crate::core::traits::StorageBackend;
use serde::Serialize;
use std::collections::VecDeque;
use serde::de::DeserializeOwned;

/// A value written to storage by someone other than this store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    /// `None` when the key was removed
    pub new_value: Option<String>,
}

/// Read `key` as JSON, returning `default` on a missing key, corrupt
/// content or a failing backend.
pub fn read<T, B>(backend: &B, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    B: StorageBackend + ?Sized,
{
    load(backend, key).map(|(value, _)| value).unwrap_or(default)
}

/// Parsed value under `key` together with the stored text
fn load<T, B>(backend: &B, key: &str) -> Option<(T, String)>
where
    T: DeserializeOwned,
    B: StorageBackend + ?Sized,
{
    match backend.get_item(key) {
        Ok(Some(text)) => match serde_json::from_str(&text) {
            Ok(value) => Some((value, text)),
            Err(e) => {
                log::warn!("Ignoring unreadable value under '{}': {}", key, e);
                None
            }
        },
        Ok(None) => {
            log::debug!("No stored value under '{}', using default", key);
            None
        }
        Err(e) => {
            log::warn!("Failed to read '{}': {}", key, e);
            None
        }
    }
}

/// Serialize `value` and persist it under `key`.
///
/// Returns the text that reached storage, or `None` when serialization or
/// the backend failed. Failures are logged, never raised.
pub fn write<T, B>(backend: &B, key: &str, value: &T) -> Option<String>
where
    T: Serialize,
    B: StorageBackend + ?Sized,
{
    let text = match serde_json::to_string(value) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Failed to serialize value for '{}': {}", key, e);
            return None;
        }
    };

    match backend.set_item(key, &text) {
        Ok(()) => Some(text),
        Err(e) => {
            log::warn!("Dropping write to '{}': {}", key, e);
            None
        }
    }
}

/// Number of own writes remembered for echo detection
const RECENT_WRITES: usize = 16;

/// In-memory value mirrored to one storage key.
///
/// Writes are optimistic: the in-memory value always updates, even when the
/// backend rejects the write.
pub struct PersistentStore<T, B> {
    backend: B,
    key: String,
    value: T,
    recent: VecDeque<String>,
}

impl<T, B> PersistentStore<T, B>
where
    T: Serialize + DeserializeOwned,
    B: StorageBackend,
{
    /// Load the current value for `key`, or `default` if none is readable.
    ///
    /// When the loaded value serializes differently from the stored text
    /// (repaired fields, generated ids) it is written back, so the next
    /// reader sees the same document.
    pub fn open(backend: B, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let Some((value, stored)) = load(&backend, &key) else {
            return Self {
                backend,
                key,
                value: default,
                recent: VecDeque::new(),
            };
        };

        let mut store = Self {
            backend,
            key,
            value,
            recent: VecDeque::new(),
        };
        match serde_json::to_string(&store.value) {
            Ok(text) if text != stored => {
                log::debug!("Writing back repaired value under '{}'", store.key);
                store.persist();
            }
            Ok(_) => {}
            Err(e) => log::warn!("Failed to serialize value for '{}': {}", store.key, e),
        }
        store
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replace the value and persist it
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    fn persist(&mut self) {
        if let Some(text) = write(&self.backend, &self.key, &self.value) {
            self.remember(text);
        }
    }

    fn remember(&mut self, text: String) {
        if self.recent.len() == RECENT_WRITES {
            self.recent.pop_front();
        }
        self.recent.push_back(text);
    }

    fn is_own_write(&self, text: &str) -> bool {
        self.recent.iter().any(|written| written == text)
    }

    /// Apply a change made by another process.
    ///
    /// Returns `true` when the in-memory value was replaced. Events for other
    /// keys, removals, echoes of this store's recent writes and unparsable
    /// payloads are ignored.
    pub fn apply_external(&mut self, event: &StorageEvent) -> bool {
        if event.key != self.key {
            return false;
        }
        let Some(text) = event.new_value.as_deref().filter(|t| !t.is_empty()) else {
            return false;
        };
        if self.is_own_write(text) {
            return false;
        }

        match serde_json::from_str(text) {
            Ok(value) => {
                log::info!("Reloaded '{}' after an external change", self.key);
                self.value = value;
                self.remember(text.to_string());
                true
            }
            Err(e) => {
                log::warn!("Ignoring unparsable external change to '{}': {}", self.key, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn test_read_falls_back_on_missing_and_corrupt() {
        let backend = MemoryBackend::new();
        assert_eq!(read(&backend, "c", Counter { count: 7 }), Counter { count: 7 });

        backend.set_item("c", "{not json").expect("write");
        assert_eq!(read(&backend, "c", Counter { count: 7 }), Counter { count: 7 });

        backend.set_item("c", "{\"count\":3}").expect("write");
        assert_eq!(read(&backend, "c", Counter { count: 7 }), Counter { count: 3 });

        backend.fail_reads(true);
        assert_eq!(read(&backend, "c", Counter { count: 7 }), Counter { count: 7 });
    }

    #[test]
    fn test_write_failure_keeps_memory_value() {
        let backend = MemoryBackend::new();
        let mut store = PersistentStore::open(backend.clone(), "c", Counter { count: 0 });

        backend.fail_writes(true);
        store.set(Counter { count: 5 });

        assert_eq!(store.get(), &Counter { count: 5 });
        assert_eq!(backend.get_item("c").expect("read"), None);
    }

    #[test]
    fn test_set_persists() {
        let backend = MemoryBackend::new();
        let mut store = PersistentStore::open(backend.clone(), "c", Counter { count: 1 });
        store.set(Counter { count: 2 });

        assert_eq!(store.get().count, 2);
        assert_eq!(backend.get_item("c").expect("read").as_deref(), Some("{\"count\":2}"));
    }

    #[test]
    fn test_open_writes_back_reformatted_value() {
        let backend = MemoryBackend::new();
        backend.set_item("c", "{ \"count\": 4 }").expect("write");

        let store = PersistentStore::open(backend.clone(), "c", Counter { count: 0 });

        assert_eq!(store.get().count, 4);
        assert_eq!(backend.get_item("c").expect("read").as_deref(), Some("{\"count\":4}"));
    }

    #[test]
    fn test_open_leaves_unreadable_value_alone() {
        let backend = MemoryBackend::new();
        backend.set_item("c", "{broken").expect("write");

        let store = PersistentStore::open(backend.clone(), "c", Counter { count: 0 });

        assert_eq!(store.get().count, 0);
        assert_eq!(backend.get_item("c").expect("read").as_deref(), Some("{broken"));
    }

    #[test]
    fn test_older_own_write_is_not_reapplied() {
        let backend = MemoryBackend::new();
        let mut store = PersistentStore::open(backend.clone(), "c", Counter { count: 0 });

        store.set(Counter { count: 1 });
        let first = backend.get_item("c").expect("read");
        store.set(Counter { count: 2 });

        let stale = StorageEvent { key: "c".into(), new_value: first };
        assert!(!store.apply_external(&stale));
        assert_eq!(store.get().count, 2);
    }

    #[test]
    fn test_apply_external_replaces_whole_value() {
        let mut store = PersistentStore::open(MemoryBackend::new(), "c", Counter { count: 1 });

        let changed = store.apply_external(&StorageEvent {
            key: "c".to_string(),
            new_value: Some("{\"count\":42}".to_string()),
        });

        assert!(changed);
        assert_eq!(store.get().count, 42);
    }

    #[test]
    fn test_apply_external_ignores_noise() {
        let mut store = PersistentStore::open(MemoryBackend::new(), "c", Counter { count: 1 });
        store.set(Counter { count: 2 });

        let events = [
            StorageEvent { key: "other".into(), new_value: Some("{\"count\":9}".into()) },
            StorageEvent { key: "c".into(), new_value: None },
            StorageEvent { key: "c".into(), new_value: Some(String::new()) },
            StorageEvent { key: "c".into(), new_value: Some("garbage".into()) },
            StorageEvent { key: "c".into(), new_value: Some("{\"count\":2}".into()) },
        ];

        for event in &events {
            assert!(!store.apply_external(event), "event should be ignored: {:?}", event);
        }
        assert_eq!(store.get().count, 2);
    }
}
