//! Derived metrics
//!
//! Pure aggregation over engine snapshots, recomputed on every call. The
//! weekly and time-to-remediate series derive from real `first_seen`
//! values and revoke receipts respectively; both yield points with
//! monotonically increasing timestamps.

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::Serialize;
use shadow_model::{
    iso_week_label, AppStatus, Receipt, ReceiptTool, RiskLevel, ShadowApp,
};
use std::collections::{BTreeMap, HashSet};

/// Headline KPI counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Kpis {
    /// Apps still awaiting a decision
    pub total_unsanctioned: usize,
    /// High-risk apps among the unsanctioned
    pub high_risk: usize,
    /// Distinct user emails across apps not yet revoked
    pub users_involved: usize,
    /// Apps whose grant has been revoked
    pub remediated: usize,
}

/// Risk level counts among non-revoked apps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// One week bucket of newly seen apps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBucket {
    /// ISO-week label, e.g. `2026-W08`
    pub label: String,
    /// Monday of the week, UTC midnight
    pub start: DateTime<Utc>,
    pub count: usize,
}

/// One time-to-remediate observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TtrPoint {
    /// When the revoke receipt was recorded
    pub ts: DateTime<Utc>,
    /// Hours from the app's `first_seen` to the revoke
    pub hours: f64,
}

/// Compute headline KPIs
#[must_use]
pub fn kpis(apps: &[ShadowApp]) -> Kpis {
    let total_unsanctioned = apps
        .iter()
        .filter(|a| a.status == AppStatus::Unsanctioned)
        .count();
    let high_risk = apps
        .iter()
        .filter(|a| a.status == AppStatus::Unsanctioned && a.risk_level == RiskLevel::High)
        .count();
    let users_involved = apps
        .iter()
        .filter(|a| a.status != AppStatus::Revoked)
        .flat_map(|a| a.users.iter().map(|u| u.email.as_str()))
        .collect::<HashSet<_>>()
        .len();
    let remediated = apps
        .iter()
        .filter(|a| a.status == AppStatus::Revoked)
        .count();
    Kpis {
        total_unsanctioned,
        high_risk,
        users_involved,
        remediated,
    }
}

/// Risk distribution among apps not yet revoked
#[must_use]
pub fn risk_distribution(apps: &[ShadowApp]) -> RiskDistribution {
    let mut dist = RiskDistribution {
        high: 0,
        medium: 0,
        low: 0,
    };
    for app in apps.iter().filter(|a| a.status != AppStatus::Revoked) {
        match app.risk_level {
            RiskLevel::High => dist.high += 1,
            RiskLevel::Medium => dist.medium += 1,
            RiskLevel::Low => dist.low += 1,
        }
    }
    dist
}

/// Bucket apps by the ISO week of `first_seen`, oldest week first
#[must_use]
pub fn weekly_new_apps(apps: &[ShadowApp]) -> Vec<WeekBucket> {
    let mut buckets: BTreeMap<DateTime<Utc>, usize> = BTreeMap::new();
    for app in apps {
        let monday = app
            .first_seen
            .date_naive()
            .week(Weekday::Mon)
            .first_day()
            .and_time(NaiveTime::MIN)
            .and_utc();
        *buckets.entry(monday).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(start, count)| WeekBucket {
            label: iso_week_label(&start),
            start,
            count,
        })
        .collect()
}

/// Time-to-remediate points derived from `graph.revokeGrant` receipts,
/// oldest first. Receipts whose app is gone are skipped.
#[must_use]
pub fn ttr_series(apps: &[ShadowApp], receipts: &[Receipt]) -> Vec<TtrPoint> {
    // The log is newest-first; walk it in causal order.
    let mut points: Vec<TtrPoint> = receipts
        .iter()
        .rev()
        .filter(|r| r.tool == ReceiptTool::GraphRevokeGrant)
        .filter_map(|r| {
            let app = apps.iter().find(|a| a.id == r.app_id)?;
            let minutes = (r.ts - app.first_seen).num_minutes().max(0);
            Some(TtrPoint {
                ts: r.ts,
                hours: minutes as f64 / 60.0,
            })
        })
        .collect();
    points.sort_by_key(|p| p.ts);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shadow_model::{AppCategory, AppUser, Department, Receipt, ShadowApp};

    fn app_at(id: &str, risk: RiskLevel, first_seen: DateTime<Utc>) -> ShadowApp {
        ShadowApp::new(id, id, "Acme", AppCategory::Other, risk, first_seen)
    }

    fn user(email: &str) -> AppUser {
        AppUser {
            id: email.to_string(),
            name: email.to_string(),
            email: email.to_string(),
            dept: Department::Engineering,
            role: None,
        }
    }

    #[test]
    fn kpi_counts() {
        let now = Utc::now();
        let mut apps = vec![
            app_at("a", RiskLevel::High, now).with_user(user("kim@corp.example")),
            app_at("b", RiskLevel::Low, now).with_user(user("kim@corp.example")),
            app_at("c", RiskLevel::High, now).with_user(user("lee@corp.example")),
        ];
        apps[2].status = AppStatus::Revoked;

        let k = kpis(&apps);
        assert_eq!(k.total_unsanctioned, 2);
        assert_eq!(k.high_risk, 1);
        // lee only appears on the revoked app, so only kim counts
        assert_eq!(k.users_involved, 1);
        assert_eq!(k.remediated, 1);
    }

    #[test]
    fn distribution_excludes_revoked() {
        let now = Utc::now();
        let mut apps = vec![
            app_at("a", RiskLevel::High, now),
            app_at("b", RiskLevel::Medium, now),
            app_at("c", RiskLevel::Low, now),
        ];
        apps[0].status = AppStatus::Revoked;
        let d = risk_distribution(&apps);
        assert_eq!((d.high, d.medium, d.low), (0, 1, 1));
    }

    #[test]
    fn weekly_buckets_are_monotonic() {
        let w1 = Utc.with_ymd_and_hms(2026, 6, 2, 10, 0, 0).unwrap();
        let w1b = Utc.with_ymd_and_hms(2026, 6, 4, 9, 0, 0).unwrap();
        let w2 = Utc.with_ymd_and_hms(2026, 6, 9, 10, 0, 0).unwrap();
        let apps = vec![
            app_at("a", RiskLevel::Low, w2),
            app_at("b", RiskLevel::Low, w1),
            app_at("c", RiskLevel::Low, w1b),
        ];
        let buckets = weekly_new_apps(&apps);
        assert_eq!(buckets.len(), 2);
        assert!(buckets[0].start < buckets[1].start);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].label, "2026-W23");
        assert_eq!(buckets[1].count, 1);
    }

    #[test]
    fn ttr_from_revoke_receipts() {
        let first_seen = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let app = app_at("a", RiskLevel::High, first_seen);
        let mut receipt = Receipt::ok(
            ReceiptTool::GraphRevokeGrant,
            app.id.clone(),
            "Sam (SecOps)",
            "OAuth grant revoked",
        );
        receipt.ts = Utc.with_ymd_and_hms(2026, 6, 2, 12, 0, 0).unwrap();
        let points = ttr_series(&[app], &[receipt]);
        assert_eq!(points.len(), 1);
        assert!((points[0].hours - 36.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ttr_skips_unknown_apps_and_other_tools() {
        let now = Utc::now();
        let app = app_at("a", RiskLevel::High, now);
        let orphan = Receipt::ok(
            ReceiptTool::GraphRevokeGrant,
            "app_gone".into(),
            "Sam (SecOps)",
            "OAuth grant revoked",
        );
        let notify = Receipt::ok(
            ReceiptTool::NotifyEmail,
            app.id.clone(),
            "system",
            "Alert: High risk app detected - a",
        );
        assert!(ttr_series(&[app], &[orphan, notify]).is_empty());
    }
}
