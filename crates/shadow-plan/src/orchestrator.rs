//! The remediation plan
//!
//! A fixed, non-skippable, non-reorderable four-step sequence against one
//! app. Each step appends exactly one receipt through the engine and is
//! durably committed before the next step begins. A pacing delay between
//! steps keeps the workflow legible in a UI; it is configurable and may
//! be zero. Cancellation is checked only at step boundaries and resets
//! the step log without rolling back receipts or status changes; partial
//! execution stands (this is a simulated workflow, not a two-phase
//! commit).

use crate::events::{PlanEvent, PlanEventBus};
use parking_lot::Mutex;
use shadow_engine::{EngineError, ShadowEngine};
use shadow_model::{now_utc, AppId, AppStatus, ReceiptId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// The four plan steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanStepKind {
    /// Revoke the OAuth grant (status becomes `Revoked`)
    RevokeGrant,
    /// End the app's active sessions
    EndSessions,
    /// Notify affected users
    NotifyUsers,
    /// Create a tracking ticket
    CreateTicket,
}

impl PlanStepKind {
    /// Execution order
    pub const ORDER: [PlanStepKind; 4] = [
        PlanStepKind::RevokeGrant,
        PlanStepKind::EndSessions,
        PlanStepKind::NotifyUsers,
        PlanStepKind::CreateTicket,
    ];

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PlanStepKind::RevokeGrant => "Revoke OAuth grant",
            PlanStepKind::EndSessions => "End active sessions",
            PlanStepKind::NotifyUsers => "Notify affected users",
            PlanStepKind::CreateTicket => "Create tracking ticket",
        }
    }
}

/// UI-observable step status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Done,
}

/// One entry in the plan's step log. The shape (ordered steps with status
/// and receipt id) is designed so progress could be persisted later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub kind: PlanStepKind,
    pub status: StepStatus,
    /// Receipt recorded for this step, once done
    pub receipt_id: Option<ReceiptId>,
}

impl PlanStep {
    fn pending(kind: PlanStepKind) -> Self {
        Self {
            kind,
            status: StepStatus::Pending,
            receipt_id: None,
        }
    }
}

/// Outcome of one approve call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanRun {
    /// All four steps completed and the approval event was published
    Completed,
    /// Cancelled at a step boundary; completed steps stand
    Cancelled,
    /// Another execution was already in flight; nothing happened
    Skipped,
}

/// Orchestrator errors
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A delegated engine mutation failed
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Orchestrator options
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Delay between steps, purely for UI legibility
    pub pacing: Duration,
}

impl PlanConfig {
    /// Default pacing
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No pacing (tests, headless runs)
    #[inline]
    #[must_use]
    pub fn instant() -> Self {
        Self {
            pacing: Duration::ZERO,
        }
    }

    /// With pacing delay
    #[inline]
    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(600),
        }
    }
}

/// The step-sequenced remediation workflow for one host UI surface
pub struct RemediationPlan {
    engine: Arc<ShadowEngine>,
    bus: PlanEventBus,
    config: PlanConfig,
    steps: Mutex<Vec<PlanStep>>,
    busy: AtomicBool,
    cancel: AtomicBool,
}

impl RemediationPlan {
    /// Create a plan bound to an engine and an event bus
    #[must_use]
    pub fn new(engine: Arc<ShadowEngine>, bus: PlanEventBus, config: PlanConfig) -> Self {
        Self {
            engine,
            bus,
            config,
            steps: Mutex::new(Self::fresh_steps()),
            busy: AtomicBool::new(false),
            cancel: AtomicBool::new(false),
        }
    }

    fn fresh_steps() -> Vec<PlanStep> {
        PlanStepKind::ORDER.iter().copied().map(PlanStep::pending).collect()
    }

    /// Snapshot of the step log
    #[must_use]
    pub fn steps(&self) -> Vec<PlanStep> {
        self.steps.lock().clone()
    }

    /// Whether an execution is currently in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Request cancellation. Takes effect at the next step boundary of an
    /// in-flight run; if no run is in flight, the step log resets
    /// immediately. Already-emitted receipts and applied status changes
    /// are never rolled back.
    pub fn cancel(&self) {
        if self.busy.load(Ordering::Acquire) {
            self.cancel.store(true, Ordering::Release);
        } else {
            *self.steps.lock() = Self::fresh_steps();
        }
    }

    /// Execute the full plan against `app_id`.
    ///
    /// Re-entrant calls while a run is in flight are safe no-ops
    /// (`PlanRun::Skipped`). Each step's receipt is appended before the
    /// next step begins. The busy flag is released even when the host
    /// drops this future at an await point.
    pub async fn approve(&self, app_id: &AppId, actor: &str) -> Result<PlanRun, PlanError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(app = %app_id, "approve ignored: plan already running");
            return Ok(PlanRun::Skipped);
        }
        let _busy = BusyGuard(&self.busy);
        self.cancel.store(false, Ordering::Release);
        *self.steps.lock() = Self::fresh_steps();

        self.run(app_id, actor).await
    }

    async fn run(&self, app_id: &AppId, actor: &str) -> Result<PlanRun, PlanError> {
        for (idx, kind) in PlanStepKind::ORDER.into_iter().enumerate() {
            if idx > 0 {
                if !self.config.pacing.is_zero() {
                    tokio::time::sleep(self.config.pacing).await;
                }
                if self.cancel.swap(false, Ordering::AcqRel) {
                    info!(app = %app_id, after_step = idx, "plan cancelled");
                    *self.steps.lock() = Self::fresh_steps();
                    return Ok(PlanRun::Cancelled);
                }
            }
            let receipt_id = self.execute_step(kind, app_id, actor).await?;
            self.mark_done(idx, receipt_id);
            debug!(app = %app_id, step = kind.label(), "plan step done");
        }

        let event = PlanEvent::Approved {
            app_id: app_id.clone(),
            status: AppStatus::Revoked,
            ts: now_utc(),
        };
        info!(app = %app_id, "plan approved");
        self.bus.publish(event);
        Ok(PlanRun::Completed)
    }

    async fn execute_step(
        &self,
        kind: PlanStepKind,
        app_id: &AppId,
        actor: &str,
    ) -> Result<ReceiptId, PlanError> {
        let receipt_id = match kind {
            PlanStepKind::RevokeGrant => self.engine.revoke_app(app_id, actor)?.id,
            PlanStepKind::EndSessions => self.engine.end_sessions(app_id, actor)?.id,
            PlanStepKind::NotifyUsers => {
                let message = "Access has been revoked pending security review";
                self.engine.notify_users(app_id, message, actor).await?.id
            }
            PlanStepKind::CreateTicket => self.engine.create_ticket(app_id, actor)?.id,
        };
        Ok(receipt_id)
    }

    fn mark_done(&self, idx: usize, receipt_id: ReceiptId) {
        let mut steps = self.steps.lock();
        steps[idx].status = StepStatus::Done;
        steps[idx].receipt_id = Some(receipt_id);
    }
}

/// Clears the busy flag when the run ends, including when the approve
/// future is dropped mid-run.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for RemediationPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemediationPlan")
            .field("busy", &self.is_busy())
            .field("steps", &*self.steps.lock())
            .finish_non_exhaustive()
    }
}
