//! Testing utilities for the Shadow-Ops workspace
//!
//! Shared fixtures: seeded engines, bare engines, quick app builders.

#![allow(missing_docs)]

use shadow_engine::{EngineConfig, ShadowEngine};
use shadow_model::{now_utc, AppCategory, AppStatus, AppUser, Department, RiskLevel, ShadowApp};
use shadow_plan::{PlanConfig, PlanEventBus, RemediationPlan};
use shadow_storage::PreferenceStore;
use std::sync::Arc;

/// Engine over in-memory storage with the demo inventory seeded
pub fn seeded_engine() -> Arc<ShadowEngine> {
    Arc::new(ShadowEngine::new(
        EngineConfig::new(),
        PreferenceStore::in_memory(),
    ))
}

/// Engine over in-memory storage with an empty inventory
pub fn empty_engine() -> Arc<ShadowEngine> {
    Arc::new(ShadowEngine::new(
        EngineConfig::new().without_seed(),
        PreferenceStore::in_memory(),
    ))
}

/// Un-paced remediation plan bound to a fresh seeded engine
pub fn instant_plan() -> (Arc<ShadowEngine>, RemediationPlan, PlanEventBus) {
    let engine = seeded_engine();
    let bus = PlanEventBus::default();
    let plan = RemediationPlan::new(engine.clone(), bus.clone(), PlanConfig::instant());
    (engine, plan, bus)
}

/// Minimal unsanctioned app for inventory tests
pub fn make_app(id: &str, risk: RiskLevel) -> ShadowApp {
    ShadowApp::new(id, id, "Test Publisher", AppCategory::Other, risk, now_utc())
}

/// App in a given lifecycle status
pub fn make_app_with_status(id: &str, risk: RiskLevel, status: AppStatus) -> ShadowApp {
    let mut app = make_app(id, risk);
    app.status = status;
    app
}

/// One involved user
pub fn make_user(email: &str) -> AppUser {
    AppUser {
        id: format!("u_{email}"),
        name: email.to_string(),
        email: email.to_string(),
        dept: Department::Engineering,
        role: None,
    }
}
