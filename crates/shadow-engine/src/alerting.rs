//! Threshold alerting with one-shot-per-app de-duplication
//!
//! The scan runs whenever the inventory or the alert configuration
//! changes (never on a timer). An app qualifies when its risk level falls
//! inside the threshold's inclusion set, it is still `Unsanctioned`, and
//! it has not alerted before. Qualifying apps are visited in inventory
//! order. The gate is per app, not per channel: an app is marked alerted
//! even when zero channels were enabled to fire.

use shadow_model::{AlertConfig, AppId, AppStatus, Receipt, ReceiptTool, ShadowApp};
use std::collections::HashSet;
use tracing::info;

/// Actor recorded on automatically emitted alert receipts
const ALERT_ACTOR: &str = "system";

/// Result of one alert scan
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// New receipts in causal (generation) order, oldest first
    pub receipts: Vec<Receipt>,
    /// App ids newly marked as alerted
    pub alerted: Vec<AppId>,
}

/// Scan the inventory for apps that should alert now.
///
/// Pure with respect to the engine: the caller commits the outcome (the
/// receipt batch and the extended alerted set) as a single state commit.
#[must_use]
pub fn scan(apps: &[ShadowApp], cfg: &AlertConfig, already_alerted: &HashSet<AppId>) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for app in apps {
        if !cfg.risk_threshold.admits(app.risk_level)
            || app.status != AppStatus::Unsanctioned
            || already_alerted.contains(&app.id)
        {
            continue;
        }
        if cfg.email {
            outcome.receipts.push(Receipt::ok(
                ReceiptTool::NotifyEmail,
                app.id.clone(),
                ALERT_ACTOR,
                format!(
                    "Alert: {} risk app detected - {}",
                    app.risk_level.as_str(),
                    app.name
                ),
            ));
        }
        // Slack reuses the notify.email tool tag; only the detail prefix
        // differs, and the channel is inert without a webhook.
        if cfg.slack && cfg.slack_webhook.is_some() {
            outcome.receipts.push(Receipt::ok(
                ReceiptTool::NotifyEmail,
                app.id.clone(),
                ALERT_ACTOR,
                format!(
                    "(Slack) Alert: {} risk app detected - {}",
                    app.risk_level.as_str(),
                    app.name
                ),
            ));
        }
        info!(app = %app.id, risk = app.risk_level.as_str(), "threshold alert");
        outcome.alerted.push(app.id.clone());
    }
    outcome
}
