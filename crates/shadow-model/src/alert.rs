//! Alert configuration
//!
//! Durable preferences controlling automatic threshold alerting. The
//! threshold is inclusive-and-above: `Medium` alerts on Medium and High
//! risk apps (see [`RiskLevel::admits`](crate::app::RiskLevel::admits)).

use crate::app::RiskLevel;
use serde::{Deserialize, Serialize};

/// Durable alert channel and threshold configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Email channel enabled
    pub email: bool,
    /// Slack channel enabled (also requires a webhook to fire)
    pub slack: bool,
    /// Minimum risk level that triggers an alert
    pub risk_threshold: RiskLevel,
    /// Slack webhook URL; the Slack channel is inert without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_webhook: Option<String>,
}

impl AlertConfig {
    /// With slack channel and webhook
    #[inline]
    #[must_use]
    pub fn with_slack(mut self, webhook: impl Into<String>) -> Self {
        self.slack = true;
        self.slack_webhook = Some(webhook.into());
        self
    }

    /// With threshold
    #[inline]
    #[must_use]
    pub fn with_threshold(mut self, threshold: RiskLevel) -> Self {
        self.risk_threshold = threshold;
        self
    }
}

impl Default for AlertConfig {
    /// The documented fallback returned whenever stored config is absent
    /// or unparsable
    fn default() -> Self {
        Self {
            email: true,
            slack: false,
            risk_threshold: RiskLevel::High,
            slack_webhook: None,
        }
    }
}
