//! Shadow-Ops domain model
//!
//! Defines the fundamental types shared by every crate in the workspace:
//! - Monitored applications and their access surface
//! - Review cases queued for human judgment
//! - Immutable audit receipts
//! - Inventory filters and alert configuration
//! - Acting personas
//!
//! Everything here is a pure data shape. Behavior (state transitions,
//! alerting, metrics) lives in `shadow-engine`.

#![warn(unreachable_pub)]

pub mod alert;
pub mod app;
pub mod case;
pub mod filters;
pub mod id;
pub mod persona;
pub mod receipt;
pub mod time;

pub use alert::AlertConfig;
pub use app::{
    AppCategory, AppStatus, AppUser, Department, Rationale, RationaleReason, RationaleSource,
    RiskLevel, ScopeGrant, ScopeRiskTag, ShadowApp,
};
pub use case::{CasePriority, ReviewCase, TimelineEntry};
pub use filters::Filters;
pub use id::{AppId, ReceiptId};
pub use persona::Persona;
pub use receipt::{Receipt, ReceiptStatus, ReceiptTool};
pub use time::{contains_ci, iso_week_label, now_utc, to_iso};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
