//! Orchestrator contract: strict step ordering, receipt-per-step,
//! busy-guard re-entrancy, completion event, and non-transactional
//! cancellation semantics.

use shadow_model::{AppId, AppStatus, ReceiptTool};
use shadow_plan::{PlanConfig, PlanEvent, PlanEventBus, PlanRun, RemediationPlan, StepStatus};
use shadow_test_utils::{instant_plan, seeded_engine};
use std::time::Duration;

#[tokio::test]
async fn steps_execute_in_fixed_order() {
    let (engine, plan, _bus) = instant_plan();
    let app_id = AppId::from("app_sketchymail");

    let run = plan.approve(&app_id, "Sam (SecOps)").await.unwrap();
    assert_eq!(run, PlanRun::Completed);

    // Causal order (oldest first) of the receipts the plan produced.
    let tools: Vec<ReceiptTool> = engine
        .receipts()
        .into_iter()
        .rev()
        .filter(|r| r.app_id == app_id && r.actor == "Sam (SecOps)")
        .map(|r| r.tool)
        .collect();
    assert_eq!(
        tools,
        vec![
            ReceiptTool::GraphRevokeGrant,
            ReceiptTool::EndSessions,
            ReceiptTool::NotifyEmail,
            ReceiptTool::TicketCreate,
        ]
    );
    assert_eq!(engine.app(&app_id).unwrap().status, AppStatus::Revoked);
}

#[tokio::test]
async fn completed_steps_carry_their_receipt_ids() {
    let (engine, plan, _bus) = instant_plan();
    let app_id = AppId::from("app_freevpn");

    plan.approve(&app_id, "Sam (SecOps)").await.unwrap();

    let steps = plan.steps();
    assert!(steps.iter().all(|s| s.status == StepStatus::Done));
    let receipt_ids: Vec<_> = engine
        .receipts()
        .into_iter()
        .filter(|r| r.app_id == app_id && r.actor == "Sam (SecOps)")
        .map(|r| r.id)
        .collect();
    for step in steps {
        assert!(receipt_ids.contains(&step.receipt_id.unwrap()));
    }
}

#[tokio::test]
async fn approval_event_is_published_on_completion() {
    let (_engine, plan, bus) = instant_plan();
    let mut rx = bus.subscribe();
    let app_id = AppId::from("app_sketchymail");

    plan.approve(&app_id, "Sam (SecOps)").await.unwrap();

    let PlanEvent::Approved { app_id: got, status, .. } = rx.recv().await.unwrap();
    assert_eq!(got, app_id);
    assert_eq!(status, AppStatus::Revoked);
}

#[tokio::test]
async fn reentrant_approve_is_a_noop() {
    let engine = seeded_engine();
    let plan = RemediationPlan::new(
        engine.clone(),
        PlanEventBus::default(),
        PlanConfig::new().with_pacing(Duration::from_millis(10)),
    );
    let app_id = AppId::from("app_sketchymail");

    // The first future sets the busy flag before its first await point,
    // so the second sees it and skips.
    let (first, second) = tokio::join!(
        plan.approve(&app_id, "Sam (SecOps)"),
        plan.approve(&app_id, "Sam (SecOps)"),
    );
    assert_eq!(first.unwrap(), PlanRun::Completed);
    assert_eq!(second.unwrap(), PlanRun::Skipped);

    // One full plan ran: exactly one revoke receipt.
    let revokes = engine
        .receipts()
        .iter()
        .filter(|r| r.tool == ReceiptTool::GraphRevokeGrant)
        .count();
    assert_eq!(revokes, 1);
}

#[tokio::test(start_paused = true)]
async fn dropped_run_releases_the_busy_guard() {
    let engine = seeded_engine();
    let plan = RemediationPlan::new(engine, PlanEventBus::default(), PlanConfig::new());
    let app_id = AppId::from("app_sketchymail");

    // The host gives up mid-run; the future is dropped at the pacing
    // sleep after step one.
    let timed_out = tokio::time::timeout(
        Duration::from_millis(10),
        plan.approve(&app_id, "Sam (SecOps)"),
    )
    .await;
    assert!(timed_out.is_err());

    // The plan is immediately usable again.
    assert!(!plan.is_busy());
    let run = plan.approve(&app_id, "Sam (SecOps)").await.unwrap();
    assert_eq!(run, PlanRun::Completed);
}

#[tokio::test]
async fn cancel_outside_a_run_resets_the_step_log() {
    let (_engine, plan, _bus) = instant_plan();
    plan.approve(&AppId::from("app_sketchymail"), "Sam (SecOps)")
        .await
        .unwrap();
    assert!(plan.steps().iter().all(|s| s.status == StepStatus::Done));

    plan.cancel();
    assert!(plan.steps().iter().all(|s| s.status == StepStatus::Pending));
    assert!(plan.steps().iter().all(|s| s.receipt_id.is_none()));
}

#[tokio::test]
async fn second_full_run_duplicates_the_revoke_receipt() {
    let (engine, plan, _bus) = instant_plan();
    let app_id = AppId::from("app_sketchymail");

    plan.approve(&app_id, "Sam (SecOps)").await.unwrap();
    plan.approve(&app_id, "Sam (SecOps)").await.unwrap();

    let revokes = engine
        .receipts()
        .iter()
        .filter(|r| r.app_id == app_id && r.tool == ReceiptTool::GraphRevokeGrant)
        .count();
    assert_eq!(revokes, 2);
    assert_eq!(engine.app(&app_id).unwrap().status, AppStatus::Revoked);
}
