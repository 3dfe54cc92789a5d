//! Monitored application model
//!
//! A `ShadowApp` is one unsanctioned/sanctioned SaaS or OAuth application
//! observed in the tenant: identity, risk classification, granted scopes,
//! involved users, lifecycle status and explanatory rationale.

use crate::id::AppId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppCategory {
    Communication,
    Storage,
    Productivity,
    Utilities,
    Developer,
    Other,
}

/// Risk classification, authoritative for filtering and alerting.
///
/// Independent of the informational `risk_score`: an analyst may pin a
/// level that disagrees with the heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Numeric rank (Low=0 .. High=2)
    #[inline]
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    /// Whether `level` falls inside the inclusive-and-above set rooted at
    /// this threshold: `High` admits {High}, `Medium` admits
    /// {High, Medium}, `Low` admits all three.
    #[inline]
    #[must_use]
    pub fn admits(self, level: RiskLevel) -> bool {
        level.rank() >= self.rank()
    }

    /// Display label
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Application lifecycle status
///
/// `Unsanctioned` is the initial state assigned at seed/import time. All
/// transitions are explicit mutator calls on the engine; nothing fires
/// automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppStatus {
    Unsanctioned,
    Sanctioned,
    Revoked,
    Dismissed,
}

impl AppStatus {
    /// Display label
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AppStatus::Unsanctioned => "Unsanctioned",
            AppStatus::Sanctioned => "Sanctioned",
            AppStatus::Revoked => "Revoked",
            AppStatus::Dismissed => "Dismissed",
        }
    }
}

/// Risk tag on a granted scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeRiskTag {
    Mail,
    Files,
    Calendar,
    Identity,
    Admin,
}

/// One OAuth scope granted to the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeGrant {
    /// Scope name as granted (e.g. `Mail.Read`)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Risk tag, when the scope touches sensitive surface
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_tag: Option<ScopeRiskTag>,
}

impl ScopeGrant {
    /// Create an untagged scope grant
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            risk_tag: None,
        }
    }

    /// With risk tag
    #[inline]
    #[must_use]
    pub fn with_risk_tag(mut self, tag: ScopeRiskTag) -> Self {
        self.risk_tag = Some(tag);
        self
    }
}

/// Department of an involved user (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Sales,
    Marketing,
    Finance,
    HR,
    Support,
}

/// One user observed using the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub dept: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// One reason supporting the risk rationale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationaleReason {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<String>,
}

/// External source backing the rationale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RationaleSource {
    pub title: String,
    pub url: String,
}

/// Explanatory metadata for the risk classification.
///
/// Immutable after seeding; no mutator touches it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rationale {
    pub summary: String,
    pub reasons: Vec<RationaleReason>,
    pub sources: Vec<RationaleSource>,
}

/// One monitored application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowApp {
    /// Stable opaque identifier, unique in the inventory
    pub id: AppId,
    pub name: String,
    pub publisher: String,
    pub category: AppCategory,
    pub description: String,
    /// Informational heuristic score
    pub risk_score: f64,
    /// Authoritative risk classification
    pub risk_level: RiskLevel,
    /// Granted scopes, in grant order
    pub scopes: Vec<ScopeGrant>,
    /// Users observed using the app
    pub users: Vec<AppUser>,
    pub first_seen: DateTime<Utc>,
    /// Refreshed by every status-changing mutation
    pub last_seen: DateTime<Utc>,
    pub status: AppStatus,
    /// Free-form tags used for filtering and risk-factor display
    pub tags: Vec<String>,
    pub rationale: Rationale,
}

impl ShadowApp {
    /// Create a new unsanctioned app with empty access surface.
    ///
    /// `first_seen`/`last_seen` start at `seen`; scopes, users, tags and
    /// rationale are filled in builder-style.
    #[must_use]
    pub fn new(
        id: impl Into<AppId>,
        name: impl Into<String>,
        publisher: impl Into<String>,
        category: AppCategory,
        risk_level: RiskLevel,
        seen: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            publisher: publisher.into(),
            category,
            description: String::new(),
            risk_score: 0.0,
            risk_level,
            scopes: Vec::new(),
            users: Vec::new(),
            first_seen: seen,
            last_seen: seen,
            status: AppStatus::Unsanctioned,
            tags: Vec::new(),
            rationale: Rationale::default(),
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With heuristic risk score
    #[inline]
    #[must_use]
    pub fn with_risk_score(mut self, score: f64) -> Self {
        self.risk_score = score;
        self
    }

    /// With a granted scope
    #[inline]
    #[must_use]
    pub fn with_scope(mut self, scope: ScopeGrant) -> Self {
        self.scopes.push(scope);
        self
    }

    /// With an involved user
    #[inline]
    #[must_use]
    pub fn with_user(mut self, user: AppUser) -> Self {
        self.users.push(user);
        self
    }

    /// With a tag
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// With rationale
    #[inline]
    #[must_use]
    pub fn with_rationale(mut self, rationale: Rationale) -> Self {
        self.rationale = rationale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now_utc;

    #[test]
    fn threshold_admission() {
        assert!(RiskLevel::High.admits(RiskLevel::High));
        assert!(!RiskLevel::High.admits(RiskLevel::Medium));
        assert!(RiskLevel::Medium.admits(RiskLevel::High));
        assert!(RiskLevel::Medium.admits(RiskLevel::Medium));
        assert!(!RiskLevel::Medium.admits(RiskLevel::Low));
        assert!(RiskLevel::Low.admits(RiskLevel::Low));
        assert!(RiskLevel::Low.admits(RiskLevel::High));
    }

    #[test]
    fn status_wire_names() {
        let json = serde_json::to_string(&AppStatus::Unsanctioned).unwrap();
        assert_eq!(json, "\"Unsanctioned\"");
        let json = serde_json::to_string(&RiskLevel::High).unwrap();
        assert_eq!(json, "\"High\"");
    }

    #[test]
    fn app_builder() {
        let app = ShadowApp::new(
            "app_test",
            "Test",
            "Acme",
            AppCategory::Utilities,
            RiskLevel::Low,
            now_utc(),
        )
        .with_tag("trial")
        .with_scope(ScopeGrant::new("User.Read", "Sign in and read profile"));

        assert_eq!(app.status, AppStatus::Unsanctioned);
        assert_eq!(app.first_seen, app.last_seen);
        assert_eq!(app.tags, vec!["trial".to_string()]);
        assert_eq!(app.scopes.len(), 1);
    }
}
