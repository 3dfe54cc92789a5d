//! Preference store facade
//!
//! Typed load/save over the two storage scopes. Every `load_*` returns a
//! usable value (empty or documented default) on any failure; every
//! `save_*` is best-effort. Failures are logged at `warn` and swallowed.

use crate::backend::KeyValueStore;
use crate::error::StorageError;
use shadow_model::{AlertConfig, AppId, Receipt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Session-scoped key holding the receipt log (newest first)
pub const RECEIPTS_KEY: &str = "shadow.receipts";
/// Durable key holding the alert configuration
pub const ALERT_CONFIG_KEY: &str = "shadow.alertConfig";
/// Durable key holding the already-alerted app-id set
pub const ALERTED_APPS_KEY: &str = "shadow.alertedApps";

/// Facade over a session scope (receipts) and a durable scope (alert
/// config, alerted-app tracking)
#[derive(Clone)]
pub struct PreferenceStore {
    session: Arc<dyn KeyValueStore>,
    durable: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    /// Create a store over the given scopes
    #[must_use]
    pub fn new(session: Arc<dyn KeyValueStore>, durable: Arc<dyn KeyValueStore>) -> Self {
        Self { session, durable }
    }

    /// Fully in-memory store for tests and storage-less environments
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(crate::backend::MemoryStore::new()),
            Arc::new(crate::backend::MemoryStore::new()),
        )
    }

    /// Load the session receipt log; `[]` on absence or corruption
    #[must_use]
    pub fn load_receipts(&self) -> Vec<Receipt> {
        load_or(&*self.session, RECEIPTS_KEY, Vec::new)
    }

    /// Best-effort write of the receipt log
    pub fn save_receipts(&self, receipts: &[Receipt]) {
        save(&*self.session, RECEIPTS_KEY, receipts);
    }

    /// Load alert configuration; documented default on any failure
    #[must_use]
    pub fn load_alert_config(&self) -> AlertConfig {
        load_or(&*self.durable, ALERT_CONFIG_KEY, AlertConfig::default)
    }

    /// Best-effort write of the alert configuration
    pub fn save_alert_config(&self, cfg: &AlertConfig) {
        save(&*self.durable, ALERT_CONFIG_KEY, cfg);
    }

    /// Load the already-alerted app-id set; empty on any failure
    #[must_use]
    pub fn load_alerted_app_ids(&self) -> HashSet<AppId> {
        // Stored as a plain string array per the storage contract
        load_or(&*self.durable, ALERTED_APPS_KEY, Vec::<AppId>::new)
            .into_iter()
            .collect()
    }

    /// Best-effort write of the alerted app-id set
    pub fn save_alerted_app_ids(&self, ids: &HashSet<AppId>) {
        let mut list: Vec<&AppId> = ids.iter().collect();
        list.sort();
        save(&*self.durable, ALERTED_APPS_KEY, &list);
    }

    /// Reset the session scope (receipts). Durable preferences survive.
    pub fn clear_session(&self) {
        if let Err(e) = self.session.remove(RECEIPTS_KEY) {
            warn!(key = RECEIPTS_KEY, error = %e, "session clear failed");
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

fn load_or<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: serde::de::DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                let err = StorageError::corrupt(key, e);
                warn!(error = %err, "falling back to default");
                default()
            }
        },
        Ok(None) => default(),
        Err(e) => {
            warn!(key, error = %e, "storage read failed, falling back to default");
            default()
        }
    }
}

fn save<T: serde::Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            let err = StorageError::encode(key, e);
            warn!(error = %err, "skipping write");
            return;
        }
    };
    if let Err(e) = store.put(key, &raw) {
        warn!(key, error = %e, "storage write failed");
    }
}
