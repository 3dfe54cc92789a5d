//! Audit receipts
//!
//! A `Receipt` is an immutable record of one completed remediation or
//! notification action. Receipts are created once by an engine mutator,
//! prepended to the receipt log (newest first), persisted to the session
//! scope, and never edited or deleted individually; bulk-clear is the only
//! removal operation.
//!
//! Stored order is causal creation order, not sort-by-timestamp: two
//! receipts can share a timestamp and still have a defined relative order.

use crate::id::{AppId, ReceiptId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The simulated tool that produced the receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiptTool {
    /// OAuth grant revocation
    #[serde(rename = "graph.revokeGrant")]
    GraphRevokeGrant,
    /// OAuth grant restoration (undo of a revoke)
    #[serde(rename = "graph.restoreGrant")]
    GraphRestoreGrant,
    /// Active session termination
    #[serde(rename = "end.sessions")]
    EndSessions,
    /// User/channel notification
    #[serde(rename = "notify.email")]
    NotifyEmail,
    /// Tracking ticket creation
    #[serde(rename = "ticket.create")]
    TicketCreate,
    /// Tracking ticket update
    #[serde(rename = "ticket.update")]
    TicketUpdate,
}

impl ReceiptTool {
    /// Wire/display name (`graph.revokeGrant` style)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReceiptTool::GraphRevokeGrant => "graph.revokeGrant",
            ReceiptTool::GraphRestoreGrant => "graph.restoreGrant",
            ReceiptTool::EndSessions => "end.sessions",
            ReceiptTool::NotifyEmail => "notify.email",
            ReceiptTool::TicketCreate => "ticket.create",
            ReceiptTool::TicketUpdate => "ticket.update",
        }
    }
}

/// Receipt outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Ok,
    /// Reserved for real transports; no simulated action produces it
    Error,
}

impl ReceiptStatus {
    /// Wire/display name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReceiptStatus::Ok => "ok",
            ReceiptStatus::Error => "error",
        }
    }
}

/// Immutable audit record of one completed action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    pub ts: DateTime<Utc>,
    pub tool: ReceiptTool,
    pub status: ReceiptStatus,
    /// Foreign reference; `AppId::system()` for non-app-scoped events
    pub app_id: AppId,
    /// Free-text identity of who triggered the action
    pub actor: String,
    pub details: String,
}

impl Receipt {
    /// Create an ok-receipt stamped now
    #[must_use]
    pub fn ok(
        tool: ReceiptTool,
        app_id: AppId,
        actor: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: ReceiptId::new(),
            ts: crate::time::now_utc(),
            tool,
            status: ReceiptStatus::Ok,
            app_id,
            actor: actor.into(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_wire_names() {
        let json = serde_json::to_string(&ReceiptTool::GraphRevokeGrant).unwrap();
        assert_eq!(json, "\"graph.revokeGrant\"");
        let json = serde_json::to_string(&ReceiptTool::EndSessions).unwrap();
        assert_eq!(json, "\"end.sessions\"");
        let tool: ReceiptTool = serde_json::from_str("\"ticket.update\"").unwrap();
        assert_eq!(tool, ReceiptTool::TicketUpdate);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_string(&ReceiptStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(
            serde_json::to_string(&ReceiptStatus::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn ok_receipt_shape() {
        let r = Receipt::ok(
            ReceiptTool::NotifyEmail,
            AppId::from("app_test"),
            "Sam (SecOps)",
            "Notified 3 users",
        );
        assert_eq!(r.status, ReceiptStatus::Ok);
        assert_eq!(r.app_id.as_str(), "app_test");
        assert_eq!(r.tool.as_str(), "notify.email");
    }
}
