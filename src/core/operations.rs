//! Core operations implementation
//!
//! `AppDataController` owns the single `AppData` document and is the only
//! way to change it. Every operation builds the next document from the
//! current one, persists it as a whole and then notifies subscribers.

use crate::config::Config;
use crate::core::data::{
    AppData, Budget, BudgetPatch, Category, CategoryPatch, DebtAccount, DebtPatch, NewCategory, NewDebt,
    NewSavingsGoal, SavingsGoal, SavingsGoalPatch, Settings, SettingsPatch, normalize,
};
use crate::core::traits::{Entity, StorageBackend};
use crate::storage::{FileBackend, PersistentStore, StorageEvent, StorageWatcher};
use crate::utils::error::{AppError, AppResult};
use crate::utils::export::backup_file_name;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Storage key of the persisted document
pub const STORAGE_KEY: &str = "budget-tracker-data";

pub type SubscriptionId = usize;

type Subscriber = Box<dyn FnMut(&AppData)>;

pub struct AppDataController<B: StorageBackend> {
    store: PersistentStore<AppData, B>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
    watcher: Option<StorageWatcher>,
}

impl AppDataController<FileBackend> {
    /// Open the document in the configured data directory
    pub fn from_config(config: &Config) -> Self {
        let backend = FileBackend::new(&config.general.data_dir);
        Self::with_key(backend, &config.general.storage_key)
    }

    /// Start following writes made by other processes.
    ///
    /// Changes are applied by [`Self::poll_external_changes`] or
    /// [`Self::wait_for_external_change`], never in the background.
    pub fn watch(&mut self, debounce: Duration) -> AppResult<()> {
        let watcher = StorageWatcher::start(self.store.backend().dir(), debounce)?;
        self.watcher = Some(watcher);
        Ok(())
    }
}

impl<B: StorageBackend> AppDataController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: &str) -> Self {
        Self {
            store: PersistentStore::open(backend, key, AppData::default()),
            subscribers: Vec::new(),
            next_subscription: 0,
            watcher: None,
        }
    }

    /// Read-only snapshot of the current document
    pub fn data(&self) -> &AppData {
        self.store.get()
    }

    // ========== Subscriptions ==========

    /// Register a callback fired after every state change, local or external
    pub fn subscribe(&mut self, callback: impl FnMut(&AppData) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&mut self) {
        let data = self.store.get();
        for (_, callback) in self.subscribers.iter_mut() {
            callback(data);
        }
    }

    fn commit(&mut self, next: AppData) {
        self.store.set(next);
        self.notify();
    }

    /// Apply `f` to a copy of the document and commit it when `f` reports a change
    fn mutate(&mut self, f: impl FnOnce(&mut AppData) -> bool) -> bool {
        let mut next = self.store.get().clone();
        if !f(&mut next) {
            return false;
        }
        self.commit(next);
        true
    }

    // ========== Settings and budget ==========

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.mutate(|data| {
            data.settings.apply_patch(patch);
            true
        });
    }

    pub fn update_settings_with(&mut self, f: impl FnOnce(Settings) -> Settings) {
        self.mutate(|data| {
            data.settings = f(std::mem::take(&mut data.settings));
            true
        });
    }

    pub fn update_budget(&mut self, patch: BudgetPatch) {
        self.mutate(|data| {
            data.budget.apply_patch(patch);
            true
        });
    }

    pub fn update_budget_with(&mut self, f: impl FnOnce(Budget) -> Budget) {
        self.mutate(|data| {
            data.budget = f(std::mem::take(&mut data.budget));
            true
        });
    }

    // ========== Categories ==========

    /// Append a category and return its generated id
    pub fn add_category(&mut self, fields: NewCategory) -> String {
        let category = Category::new(fields);
        let id = category.id.clone();
        self.mutate(|data| {
            data.budget.categories.push(category);
            true
        });
        id
    }

    /// Merge `patch` into the category with `id`; returns `false` on a miss
    pub fn update_category(&mut self, id: &str, patch: CategoryPatch) -> bool {
        self.mutate(|data| update_entry(&mut data.budget.categories, id, patch))
    }

    pub fn remove_category(&mut self, id: &str) -> bool {
        self.mutate(|data| remove_entry(&mut data.budget.categories, id))
    }

    // ========== Savings goals ==========

    pub fn add_savings_goal(&mut self, fields: NewSavingsGoal) -> String {
        let goal = SavingsGoal::new(fields);
        let id = goal.id.clone();
        self.mutate(|data| {
            data.savings.push(goal);
            true
        });
        id
    }

    pub fn update_savings_goal(&mut self, id: &str, patch: SavingsGoalPatch) -> bool {
        self.mutate(|data| update_entry(&mut data.savings, id, patch))
    }

    pub fn remove_savings_goal(&mut self, id: &str) -> bool {
        self.mutate(|data| remove_entry(&mut data.savings, id))
    }

    // ========== Debt accounts ==========

    pub fn add_debt(&mut self, fields: NewDebt) -> String {
        let account = DebtAccount::new(fields);
        let id = account.id.clone();
        self.mutate(|data| {
            data.debt.push(account);
            true
        });
        id
    }

    pub fn update_debt(&mut self, id: &str, patch: DebtPatch) -> bool {
        self.mutate(|data| update_entry(&mut data.debt, id, patch))
    }

    pub fn remove_debt(&mut self, id: &str) -> bool {
        self.mutate(|data| remove_entry(&mut data.debt, id))
    }

    // ========== Export / import / reset ==========

    /// Current document as pretty-printed JSON
    pub fn export_data(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self.data())
            .map_err(|e| AppError::System(format!("Failed to serialize data: {}", e)))
    }

    /// Replace the whole document with `text` if it is a plausible export.
    ///
    /// Returns `false` and leaves the state untouched on invalid JSON or a
    /// missing `savings`, `debt` or `budget.categories` array.
    pub fn import_data(&mut self, text: &str) -> bool {
        let parsed: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                log::info!("Rejected import: {}", e);
                return false;
            }
        };

        if !has_import_shape(&parsed) {
            log::info!("Rejected import: missing savings, debt or budget.categories");
            return false;
        }

        self.commit(normalize(&parsed));
        true
    }

    /// Replace the document with the zero-valued defaults
    pub fn reset_data(&mut self) {
        self.commit(AppData::default());
    }

    /// Write the export to a dated backup file inside `dir`
    pub fn export_to_file(&self, dir: &Path) -> AppResult<PathBuf> {
        let content = self.export_data()?;
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;

        let path = dir.join(backup_file_name(chrono::Local::now().date_naive()));
        std::fs::write(&path, content)
            .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

        log::info!("Exported data to {}", path.display());
        Ok(path)
    }

    /// Read `path` and hand its content to [`Self::import_data`]
    pub fn import_from_file(&mut self, path: &Path) -> AppResult<bool> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(self.import_data(&text))
    }

    // ========== External changes ==========

    /// Apply a write made by another process; returns `true` if state changed
    pub fn handle_storage_event(&mut self, event: &StorageEvent) -> bool {
        if !self.store.apply_external(event) {
            return false;
        }
        self.notify();
        true
    }

    /// Apply every change the watcher has reported so far
    pub fn poll_external_changes(&mut self) -> bool {
        let mut changed = false;
        loop {
            let Some(event) = self.watcher.as_ref().and_then(StorageWatcher::try_next) else {
                break;
            };
            changed |= self.handle_storage_event(&event);
        }
        changed
    }

    /// Block up to `timeout` for one external change and apply it
    pub fn wait_for_external_change(&mut self, timeout: Duration) -> bool {
        let event = self
            .watcher
            .as_ref()
            .and_then(|w| w.next_timeout(timeout));
        match event {
            Some(event) => self.handle_storage_event(&event),
            None => false,
        }
    }
}

fn update_entry<T: Entity>(list: &mut [T], id: &str, patch: T::Patch) -> bool {
    match list.iter_mut().find(|entry| entry.id() == id) {
        Some(entry) => {
            entry.apply_patch(patch);
            true
        }
        None => false,
    }
}

fn remove_entry<T: Entity>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| entry.id() != id);
    list.len() != before
}

fn has_import_shape(value: &Value) -> bool {
    let is_array = |v: Option<&Value>| v.is_some_and(Value::is_array);

    value.is_object()
        && is_array(value.get("savings"))
        && is_array(value.get("debt"))
        && value.get("budget").is_some_and(Value::is_object)
        && is_array(value.get("budget").and_then(|b| b.get("categories")))
}
