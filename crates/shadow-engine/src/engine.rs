//! The shadow engine
//!
//! Process-wide application state container. Owns the inventory, review
//! cases, receipt log, filters, alert configuration and persona. Exposes
//! snapshot selectors and named mutators; every mutator commits its state
//! change, the receipt append, the alert re-scan and persistence inside a
//! single lock hold, which serializes concurrent callers.

use crate::alerting;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::metrics::{self, Kpis, RiskDistribution, TtrPoint, WeekBucket};
use crate::{export, seed};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use shadow_model::{
    now_utc, AlertConfig, AppId, AppStatus, Filters, Persona, Receipt, ReceiptId, ReceiptTool,
    ReviewCase, ShadowApp,
};
use shadow_storage::PreferenceStore;
use std::collections::HashSet;
use tracing::{debug, info};

/// Acknowledgment returned by [`ShadowEngine::notify_users`]
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyAck {
    /// Always true: there is no transport, so no failure path
    pub ok: bool,
    /// Id of the appended notify receipt
    pub id: ReceiptId,
    /// Timestamp of the appended receipt
    pub ts: DateTime<Utc>,
}

#[derive(Debug)]
struct EngineState {
    apps: Vec<ShadowApp>,
    cases: Vec<ReviewCase>,
    /// Newest first; order is causal creation order, not sort-by-ts
    receipts: Vec<Receipt>,
    filters: Filters,
    alert_config: AlertConfig,
    alerted: HashSet<AppId>,
    persona: Persona,
}

/// The single source of truth for inventory, cases, receipts and alerting
#[derive(Debug)]
pub struct ShadowEngine {
    prefs: PreferenceStore,
    state: Mutex<EngineState>,
}

impl ShadowEngine {
    /// Construct an engine over the given preference store.
    ///
    /// Receipts, alert configuration and the alerted-app set are loaded
    /// from storage (with documented defaults on any failure). Seeding the
    /// demo inventory counts as an inventory change, so the alert scan
    /// runs once before the constructor returns.
    #[must_use]
    pub fn new(config: EngineConfig, prefs: PreferenceStore) -> Self {
        let (apps, cases) = if config.seed_demo_data {
            (seed::demo_apps(), seed::demo_cases())
        } else {
            (Vec::new(), Vec::new())
        };
        let state = EngineState {
            apps,
            cases,
            receipts: prefs.load_receipts(),
            filters: Filters::default(),
            alert_config: prefs.load_alert_config(),
            alerted: prefs.load_alerted_app_ids(),
            persona: config.initial_persona,
        };
        let engine = Self {
            prefs,
            state: Mutex::new(state),
        };
        {
            let mut state = engine.state.lock();
            engine.rescan_alerts(&mut state);
            engine.prefs.save_receipts(&state.receipts);
        }
        engine
    }

    /// Import additional apps into the inventory (appended in given
    /// order). Triggers the alert re-scan.
    pub fn import_apps(&self, apps: Vec<ShadowApp>) {
        let mut state = self.state.lock();
        info!(count = apps.len(), "importing apps");
        state.apps.extend(apps);
        self.rescan_alerts(&mut state);
        self.prefs.save_receipts(&state.receipts);
    }

    /// Import additional review cases
    pub fn import_cases(&self, cases: Vec<ReviewCase>) {
        self.state.lock().cases.extend(cases);
    }

    // Lifecycle mutators.
    //
    // Permissive-idempotent by design: none of these validate that the
    // current status is a sensible predecessor. Re-revoking a Revoked app
    // succeeds, appends another receipt and leaves the status unchanged.

    /// Revoke the app's OAuth grant. Status becomes `Revoked`.
    pub fn revoke_app(&self, app_id: &AppId, actor: &str) -> Result<Receipt, EngineError> {
        self.transition(
            app_id,
            actor,
            AppStatus::Revoked,
            ReceiptTool::GraphRevokeGrant,
            "OAuth grant revoked",
        )
    }

    /// Restore a revoked grant. Status returns to `Unsanctioned`.
    pub fn unrevoke_app(&self, app_id: &AppId, actor: &str) -> Result<Receipt, EngineError> {
        self.transition(
            app_id,
            actor,
            AppStatus::Unsanctioned,
            ReceiptTool::GraphRestoreGrant,
            "OAuth grant restored",
        )
    }

    /// Sanction the app for official use. Status becomes `Sanctioned`.
    pub fn sanction_app(&self, app_id: &AppId, actor: &str) -> Result<Receipt, EngineError> {
        self.transition(
            app_id,
            actor,
            AppStatus::Sanctioned,
            ReceiptTool::TicketCreate,
            "Sanctioned; onboarding ticket created",
        )
    }

    /// Revert a sanction. Status returns to `Unsanctioned`.
    pub fn unsanction_app(&self, app_id: &AppId, actor: &str) -> Result<Receipt, EngineError> {
        self.transition(
            app_id,
            actor,
            AppStatus::Unsanctioned,
            ReceiptTool::TicketUpdate,
            "Sanction reverted; ticket updated",
        )
    }

    /// Dismiss the app as accepted risk. Status becomes `Dismissed`.
    pub fn dismiss_app(&self, app_id: &AppId, actor: &str) -> Result<Receipt, EngineError> {
        self.transition(
            app_id,
            actor,
            AppStatus::Dismissed,
            ReceiptTool::TicketCreate,
            "Dismissed as accepted risk; ticket created",
        )
    }

    /// Revert a dismissal. Status returns to `Unsanctioned`.
    pub fn undismiss_app(&self, app_id: &AppId, actor: &str) -> Result<Receipt, EngineError> {
        self.transition(
            app_id,
            actor,
            AppStatus::Unsanctioned,
            ReceiptTool::TicketUpdate,
            "Dismissal reverted; ticket updated",
        )
    }

    // Non-status mutators.

    /// Simulate ending the app's active sessions. No status change.
    pub fn end_sessions(&self, app_id: &AppId, actor: &str) -> Result<Receipt, EngineError> {
        let mut state = self.state.lock();
        let app = find_app(&state.apps, app_id)?;
        let details = format!("Ended {} active sessions", app.users.len());
        let receipt = Receipt::ok(ReceiptTool::EndSessions, app_id.clone(), actor, details);
        self.commit_receipt(&mut state, receipt.clone());
        Ok(receipt)
    }

    /// Create a tracking ticket for the app. No status change.
    pub fn create_ticket(&self, app_id: &AppId, actor: &str) -> Result<Receipt, EngineError> {
        let mut state = self.state.lock();
        let app = find_app(&state.apps, app_id)?;
        let details = format!("Tracking ticket created for {}", app.name);
        let receipt = Receipt::ok(ReceiptTool::TicketCreate, app_id.clone(), actor, details);
        self.commit_receipt(&mut state, receipt.clone());
        Ok(receipt)
    }

    /// Notify the app's users. No status change; always succeeds (sends
    /// are simulated). Resolves after the receipt is durably appended.
    pub async fn notify_users(
        &self,
        app_id: &AppId,
        message: &str,
        actor: &str,
    ) -> Result<NotifyAck, EngineError> {
        let receipt = {
            let mut state = self.state.lock();
            let app = find_app(&state.apps, app_id)?;
            let details = format!("Notified {} users: {message}", app.users.len());
            let receipt = Receipt::ok(ReceiptTool::NotifyEmail, app_id.clone(), actor, details);
            self.commit_receipt(&mut state, receipt.clone());
            receipt
        };
        Ok(NotifyAck {
            ok: true,
            id: receipt.id,
            ts: receipt.ts,
        })
    }

    // Preferences, filters, persona.

    /// Replace the alert configuration, persist it, and re-run the alert
    /// scan against the current inventory.
    pub fn update_alert_config(&self, cfg: AlertConfig) {
        let mut state = self.state.lock();
        state.alert_config = cfg;
        self.prefs.save_alert_config(&state.alert_config);
        self.rescan_alerts(&mut state);
        self.prefs.save_receipts(&state.receipts);
    }

    /// Replace the ephemeral inventory filters
    pub fn set_filters(&self, filters: Filters) {
        self.state.lock().filters = filters;
    }

    /// Switch the acting persona (volatile; not persisted)
    pub fn set_persona(&self, persona: Persona) {
        self.state.lock().persona = persona;
    }

    /// Bulk-clear the receipt log, the only receipt removal operation
    pub fn clear_receipts(&self) {
        let mut state = self.state.lock();
        state.receipts.clear();
        self.prefs.save_receipts(&state.receipts);
        info!("receipt log cleared");
    }

    // Selectors (snapshot reads).

    /// Snapshot of the full inventory, in import order
    #[must_use]
    pub fn apps(&self) -> Vec<ShadowApp> {
        self.state.lock().apps.clone()
    }

    /// Look up one app
    #[must_use]
    pub fn app(&self, app_id: &AppId) -> Option<ShadowApp> {
        self.state
            .lock()
            .apps
            .iter()
            .find(|a| &a.id == app_id)
            .cloned()
    }

    /// Review cases whose app still exists; orphaned cases are silently
    /// dropped (no referential integrity below this point)
    #[must_use]
    pub fn cases(&self) -> Vec<ReviewCase> {
        let state = self.state.lock();
        state
            .cases
            .iter()
            .filter(|c| state.apps.iter().any(|a| a.id == c.app_id))
            .cloned()
            .collect()
    }

    /// Snapshot of the receipt log, newest first
    #[must_use]
    pub fn receipts(&self) -> Vec<Receipt> {
        self.state.lock().receipts.clone()
    }

    /// Current inventory filters
    #[must_use]
    pub fn filters(&self) -> Filters {
        self.state.lock().filters.clone()
    }

    /// Current alert configuration
    #[must_use]
    pub fn alert_config(&self) -> AlertConfig {
        self.state.lock().alert_config.clone()
    }

    /// Current acting persona
    #[must_use]
    pub fn persona(&self) -> Persona {
        self.state.lock().persona
    }

    /// Apps matching the current filters
    #[must_use]
    pub fn filtered_apps(&self) -> Vec<ShadowApp> {
        let state = self.state.lock();
        state
            .apps
            .iter()
            .filter(|a| state.filters.matches(a))
            .cloned()
            .collect()
    }

    // Derived metrics, recomputed per call and never cached.

    /// Headline KPI counts
    #[must_use]
    pub fn kpis(&self) -> Kpis {
        let state = self.state.lock();
        metrics::kpis(&state.apps)
    }

    /// High/Medium/Low counts among non-revoked apps
    #[must_use]
    pub fn risk_distribution(&self) -> RiskDistribution {
        let state = self.state.lock();
        metrics::risk_distribution(&state.apps)
    }

    /// New apps bucketed by the ISO week of `first_seen`
    #[must_use]
    pub fn weekly_new_apps(&self) -> Vec<WeekBucket> {
        let state = self.state.lock();
        metrics::weekly_new_apps(&state.apps)
    }

    /// Time-to-remediate points derived from revoke receipts
    #[must_use]
    pub fn ttr_series(&self) -> Vec<TtrPoint> {
        let state = self.state.lock();
        metrics::ttr_series(&state.apps, &state.receipts)
    }

    // Export.

    /// CSV of the currently filtered inventory
    #[must_use]
    pub fn inventory_csv(&self) -> String {
        export::inventory_csv(&self.filtered_apps())
    }

    /// CSV of the full audit receipt log
    #[must_use]
    pub fn audit_csv(&self) -> String {
        let state = self.state.lock();
        export::audit_csv(&state.receipts, &state.apps)
    }

    // Internals.

    /// Apply one lifecycle transition: set status, refresh `last_seen`,
    /// append exactly one receipt, re-scan alerts, persist.
    fn transition(
        &self,
        app_id: &AppId,
        actor: &str,
        status: AppStatus,
        tool: ReceiptTool,
        details: &str,
    ) -> Result<Receipt, EngineError> {
        let mut state = self.state.lock();
        let app = state
            .apps
            .iter_mut()
            .find(|a| &a.id == app_id)
            .ok_or_else(|| EngineError::not_found(app_id))?;
        app.status = status;
        app.last_seen = now_utc();
        debug!(app = %app_id, status = status.as_str(), tool = tool.as_str(), "lifecycle transition");
        let receipt = Receipt::ok(tool, app_id.clone(), actor, details);
        state.receipts.insert(0, receipt.clone());
        self.rescan_alerts(&mut state);
        self.prefs.save_receipts(&state.receipts);
        Ok(receipt)
    }

    /// Append one receipt and persist the log. Non-status mutations do
    /// not re-scan: neither the inventory nor the alert config changed.
    fn commit_receipt(&self, state: &mut EngineState, receipt: Receipt) {
        state.receipts.insert(0, receipt);
        self.prefs.save_receipts(&state.receipts);
    }

    /// Run the alert de-duplication scan and commit its batch: new
    /// receipts are prepended in causal order and the alerted set is
    /// persisted once, not per app.
    fn rescan_alerts(&self, state: &mut EngineState) {
        let outcome = alerting::scan(&state.apps, &state.alert_config, &state.alerted);
        if outcome.alerted.is_empty() {
            return;
        }
        state.alerted.extend(outcome.alerted.iter().cloned());
        // Newest first: the last receipt generated lands at index 0.
        for receipt in outcome.receipts {
            state.receipts.insert(0, receipt);
        }
        self.prefs.save_alerted_app_ids(&state.alerted);
    }
}

fn find_app<'a>(apps: &'a [ShadowApp], app_id: &AppId) -> Result<&'a ShadowApp, EngineError> {
    apps.iter()
        .find(|a| &a.id == app_id)
        .ok_or_else(|| EngineError::not_found(app_id))
}
