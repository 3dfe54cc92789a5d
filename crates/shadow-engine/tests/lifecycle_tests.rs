//! Lifecycle state-machine coverage: every mutator, its target status,
//! its receipt tool, and the permissive-idempotent re-application policy.

use pretty_assertions::assert_eq;
use shadow_engine::ShadowEngine;
use shadow_model::{AppId, AppStatus, ReceiptStatus, ReceiptTool, RiskLevel};
use shadow_test_utils::{empty_engine, make_app, seeded_engine};

/// Low-risk app under the default High threshold: no alert receipts ever
/// fire, so every receipt in the log comes from an explicit mutator call.
fn engine_with_quiet_app() -> (std::sync::Arc<ShadowEngine>, AppId) {
    let engine = empty_engine();
    engine.import_apps(vec![make_app("app_quiet", RiskLevel::Low)]);
    (engine, AppId::from("app_quiet"))
}

#[test]
fn every_mutator_hits_its_documented_target() {
    let table: [(
        fn(&ShadowEngine, &AppId, &str) -> Result<shadow_model::Receipt, shadow_engine::EngineError>,
        AppStatus,
        ReceiptTool,
    ); 6] = [
        (ShadowEngine::revoke_app, AppStatus::Revoked, ReceiptTool::GraphRevokeGrant),
        (ShadowEngine::unrevoke_app, AppStatus::Unsanctioned, ReceiptTool::GraphRestoreGrant),
        (ShadowEngine::sanction_app, AppStatus::Sanctioned, ReceiptTool::TicketCreate),
        (ShadowEngine::unsanction_app, AppStatus::Unsanctioned, ReceiptTool::TicketUpdate),
        (ShadowEngine::dismiss_app, AppStatus::Dismissed, ReceiptTool::TicketCreate),
        (ShadowEngine::undismiss_app, AppStatus::Unsanctioned, ReceiptTool::TicketUpdate),
    ];

    let (engine, id) = engine_with_quiet_app();
    for (i, (mutator, expected_status, expected_tool)) in table.into_iter().enumerate() {
        let before_count = engine.receipts().len();
        let before_seen = engine.app(&id).unwrap().last_seen;

        let receipt = mutator(&engine, &id, "Sam (SecOps)").unwrap();

        let app = engine.app(&id).unwrap();
        assert_eq!(app.status, expected_status, "step {i}");
        assert!(app.last_seen >= before_seen, "step {i}: lastSeen regressed");

        let receipts = engine.receipts();
        assert_eq!(receipts.len(), before_count + 1, "step {i}: exactly one receipt");
        assert_eq!(receipts[0].id, receipt.id, "step {i}: newest first");
        assert_eq!(receipts[0].tool, expected_tool, "step {i}");
        assert_eq!(receipts[0].status, ReceiptStatus::Ok, "step {i}");
        assert_eq!(receipts[0].app_id, id, "step {i}");
        assert_eq!(receipts[0].actor, "Sam (SecOps)", "step {i}");
    }
}

#[test]
fn re_revoking_is_permissive_and_appends_again() {
    let (engine, id) = engine_with_quiet_app();
    engine.revoke_app(&id, "Sam (SecOps)").unwrap();
    engine.revoke_app(&id, "Sam (SecOps)").unwrap();

    assert_eq!(engine.app(&id).unwrap().status, AppStatus::Revoked);
    let revokes = engine
        .receipts()
        .iter()
        .filter(|r| r.tool == ReceiptTool::GraphRevokeGrant)
        .count();
    assert_eq!(revokes, 2);
}

#[test]
fn revoking_sketchymail_moves_the_kpis() {
    let engine = seeded_engine();
    let id = AppId::from("app_sketchymail");
    let before = engine.kpis();
    let before_receipts = engine.receipts().len();

    engine.revoke_app(&id, "Sam (SecOps)").unwrap();

    let after = engine.kpis();
    assert_eq!(after.remediated, before.remediated + 1);
    assert_eq!(after.total_unsanctioned, before.total_unsanctioned - 1);

    let receipts = engine.receipts();
    assert_eq!(receipts.len(), before_receipts + 1);
    assert_eq!(receipts[0].tool, ReceiptTool::GraphRevokeGrant);
    assert_eq!(receipts[0].status, ReceiptStatus::Ok);
    assert_eq!(receipts[0].app_id, id);
}

#[tokio::test]
async fn notify_users_resolves_after_the_receipt_is_durable() {
    let (engine, id) = engine_with_quiet_app();
    let ack = engine
        .notify_users(&id, "Please migrate to the sanctioned client", "Sam (SecOps)")
        .await
        .unwrap();

    assert!(ack.ok);
    let receipts = engine.receipts();
    assert_eq!(receipts[0].id, ack.id);
    assert_eq!(receipts[0].tool, ReceiptTool::NotifyEmail);
    assert_eq!(engine.app(&id).unwrap().status, AppStatus::Unsanctioned);
}

#[test]
fn receipt_order_is_causal_not_timestamp() {
    // A burst of mutations in one instant still reads newest-first by
    // creation order.
    let (engine, id) = engine_with_quiet_app();
    engine.revoke_app(&id, "Sam (SecOps)").unwrap();
    engine.unrevoke_app(&id, "Sam (SecOps)").unwrap();
    engine.dismiss_app(&id, "Sam (SecOps)").unwrap();

    let tools: Vec<ReceiptTool> = engine.receipts().iter().map(|r| r.tool).collect();
    assert_eq!(
        tools,
        vec![
            ReceiptTool::TicketCreate,
            ReceiptTool::GraphRestoreGrant,
            ReceiptTool::GraphRevokeGrant,
        ]
    );
}
