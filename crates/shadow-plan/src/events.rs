//! Plan event bus
//!
//! Explicit typed pub/sub channel replacing an ambient event target.
//! The orchestrator publishes here; interested views subscribe. Events
//! are fire-and-forget: publishing with no subscribers is fine.

use chrono::{DateTime, Utc};
use shadow_model::{AppId, AppStatus};
use tokio::sync::broadcast;

/// Events published by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    /// A remediation plan ran to completion for `app_id`
    Approved {
        app_id: AppId,
        /// Final lifecycle status (always `Revoked` for the current plan)
        status: AppStatus,
        ts: DateTime<Utc>,
    },
}

/// Broadcast channel for plan events
#[derive(Debug, Clone)]
pub struct PlanEventBus {
    tx: broadcast::Sender<PlanEvent>,
}

impl PlanEventBus {
    /// Create a bus buffering up to `capacity` undelivered events per
    /// subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to future events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PlanEvent> {
        self.tx.subscribe()
    }

    /// Publish an event; absence of subscribers is not an error
    pub fn publish(&self, event: PlanEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for PlanEventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
