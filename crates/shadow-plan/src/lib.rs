//! Shadow-Ops remediation plan orchestrator
//!
//! Drives one target app through the fixed four-step remediation
//! sequence (revoke grant, end sessions, notify users, create ticket),
//! recording a receipt per step and publishing a typed `PlanApproved`
//! event on completion. Steps are strictly sequential; cancellation is
//! cooperative and only takes effect between steps; partial execution is
//! never rolled back.

#![warn(unreachable_pub)]

pub mod events;
pub mod orchestrator;

pub use events::{PlanEvent, PlanEventBus};
pub use orchestrator::{
    PlanConfig, PlanError, PlanRun, PlanStep, PlanStepKind, RemediationPlan, StepStatus,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
