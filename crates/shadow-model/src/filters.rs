//! Inventory filters
//!
//! Ephemeral UI-bound query over the inventory; never persisted across
//! sessions. `None` risk/status act as "All" wildcards.

use crate::app::{AppStatus, RiskLevel, ShadowApp};
use crate::time::contains_ci;
use serde::{Deserialize, Serialize};

/// Composite inventory filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Free-text query, OR-matched against name/publisher/tags
    pub q: String,
    /// Risk filter; `None` means "All"
    pub risk: Option<RiskLevel>,
    /// Status filter; `None` means "All"
    pub status: Option<AppStatus>,
    /// Tag filter; an app must carry every selected tag
    pub tags: Vec<String>,
}

impl Filters {
    /// Wildcard-everything filter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With free-text query
    #[inline]
    #[must_use]
    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.q = q.into();
        self
    }

    /// With risk filter
    #[inline]
    #[must_use]
    pub fn with_risk(mut self, risk: RiskLevel) -> Self {
        self.risk = Some(risk);
        self
    }

    /// With status filter
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: AppStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// With a required tag
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether an app satisfies every active criterion.
    ///
    /// Free text matches case-insensitively against name, publisher or any
    /// tag (OR across fields); risk and status must match exactly when
    /// set; every selected tag must be present (AND across tags).
    #[must_use]
    pub fn matches(&self, app: &ShadowApp) -> bool {
        if !self.q.is_empty() {
            let hit = contains_ci(&app.name, &self.q)
                || contains_ci(&app.publisher, &self.q)
                || app.tags.iter().any(|t| contains_ci(t, &self.q));
            if !hit {
                return false;
            }
        }
        if let Some(risk) = self.risk {
            if app.risk_level != risk {
                return false;
            }
        }
        if let Some(status) = self.status {
            if app.status != status {
                return false;
            }
        }
        self.tags
            .iter()
            .all(|wanted| app.tags.iter().any(|t| t == wanted))
    }
}
