//! Shadow-Ops persisted preference store
//!
//! Two persistence scopes with different lifetimes:
//! - a **session** scope holding the audit receipt log, intentionally
//!   reset when the session ends
//! - a **durable** scope holding alert configuration and the
//!   already-alerted app-id set, surviving indefinitely
//!
//! Backends implement the small [`KeyValueStore`] trait; callers go
//! through the [`PreferenceStore`] facade, which always returns a usable
//! value. Storage failures (missing backend, quota, corrupt JSON) are
//! recovered with defaults and logged, never surfaced as errors.

#![warn(unreachable_pub)]

pub mod backend;
pub mod error;
pub mod preferences;

pub use backend::{JsonFileStore, KeyValueStore, MemoryStore};
pub use error::StorageError;
pub use preferences::PreferenceStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
