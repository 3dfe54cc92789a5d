//! CSV export
//!
//! Two testable external contracts consumed by UI surfaces:
//! - inventory exports: `Name,Publisher,Risk,Users,First Seen,Last Seen,Status,Tags`
//! - audit exports: `ts,actor,appName,tool,id,status,details`
//!
//! Standard CSV quoting: fields containing commas, quotes or newlines are
//! double-quote-wrapped with embedded quotes doubled.

use shadow_model::{to_iso, Receipt, ShadowApp};

/// Inventory export header
pub const INVENTORY_HEADER: &str = "Name,Publisher,Risk,Users,First Seen,Last Seen,Status,Tags";
/// Audit export header
pub const AUDIT_HEADER: &str = "ts,actor,appName,tool,id,status,details";

/// Export apps to inventory CSV: one header line plus one row per app
#[must_use]
pub fn inventory_csv(apps: &[ShadowApp]) -> String {
    let mut out = String::from(INVENTORY_HEADER);
    for app in apps {
        out.push('\n');
        let row = [
            field(&app.name),
            field(&app.publisher),
            field(app.risk_level.as_str()),
            app.users.len().to_string(),
            to_iso(&app.first_seen),
            to_iso(&app.last_seen),
            field(app.status.as_str()),
            field(&app.tags.join(";")),
        ];
        out.push_str(&row.join(","));
    }
    out
}

/// Export the receipt log to audit CSV. App names are resolved from the
/// inventory; receipts whose app is gone (or `system`) keep the raw id.
#[must_use]
pub fn audit_csv(receipts: &[Receipt], apps: &[ShadowApp]) -> String {
    let mut out = String::from(AUDIT_HEADER);
    for receipt in receipts {
        let app_name = apps
            .iter()
            .find(|a| a.id == receipt.app_id)
            .map_or(receipt.app_id.as_str(), |a| a.name.as_str());
        out.push('\n');
        let row = [
            to_iso(&receipt.ts),
            field(&receipt.actor),
            field(app_name),
            field(receipt.tool.as_str()),
            receipt.id.to_string(),
            field(receipt.status.as_str()),
            field(&receipt.details),
        ];
        out.push_str(&row.join(","));
    }
    out
}

/// Quote a field when it contains a comma, quote or newline
fn field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
