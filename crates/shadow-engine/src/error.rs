//! Error types for the engine
//!
//! Storage failures never reach callers (the preference facade recovers
//! with defaults), so the engine's only failure mode is a mutator invoked
//! against an unknown app id. Every mutator reports it the same way.

use shadow_model::AppId;

/// Engine errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Mutator called with an app id not present in the inventory
    #[error("app not found: {app_id}")]
    AppNotFound {
        /// The unknown id
        app_id: AppId,
    },
}

impl EngineError {
    /// Create a not-found error for `app_id`
    #[inline]
    #[must_use]
    pub fn not_found(app_id: &AppId) -> Self {
        Self::AppNotFound {
            app_id: app_id.clone(),
        }
    }
}
