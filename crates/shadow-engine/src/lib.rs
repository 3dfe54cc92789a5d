//! Shadow-Ops core engine
//!
//! The single source of truth for the security-operations workflow:
//! - App inventory with an explicit lifecycle state machine
//! - Review cases awaiting human judgment
//! - An append-only, newest-first audit receipt log
//! - Threshold alerting with one-shot-per-app de-duplication
//! - Derived KPI/series metrics and CSV export
//!
//! The engine is an explicit context object: construct one per process or
//! test and pass it by `Arc`. There are no ambient singletons. All reads
//! are snapshot reads; all writes go through named mutators, each of which
//! commits state, persistence and the alert re-scan under one lock hold.
//!
//! # Example
//!
//! ```rust
//! use shadow_engine::{EngineConfig, ShadowEngine};
//! use shadow_storage::PreferenceStore;
//!
//! let engine = ShadowEngine::new(EngineConfig::new(), PreferenceStore::in_memory());
//! let receipt = engine.revoke_app(&"app_sketchymail".into(), "Sam (SecOps)").unwrap();
//! assert_eq!(receipt.tool.as_str(), "graph.revokeGrant");
//! ```

#![warn(unreachable_pub)]

pub mod alerting;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod metrics;
pub mod seed;

pub use config::EngineConfig;
pub use engine::{NotifyAck, ShadowEngine};
pub use error::EngineError;
pub use export::{audit_csv, inventory_csv};
pub use metrics::{Kpis, RiskDistribution, TtrPoint, WeekBucket};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
