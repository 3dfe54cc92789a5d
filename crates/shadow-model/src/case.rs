//! Review cases
//!
//! A `ReviewCase` is a queued judgment task bound 1:1 to an app via
//! `app_id`. No referential integrity is enforced at this layer; engine
//! selectors silently drop cases whose app is gone.

use crate::id::AppId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Case priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CasePriority {
    P0,
    P1,
    P2,
}

/// One timeline entry; the timeline is append-only and never mutated
/// after creation in current scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub ts: DateTime<Utc>,
    pub event: String,
}

/// A queued judgment task for one app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCase {
    pub id: String,
    pub app_id: AppId,
    pub priority: CasePriority,
    /// Detection confidence in [0, 1]
    pub confidence: f64,
    /// Estimated blast radius in [0, 1]
    pub impact: f64,
    /// Ordered event history; consumers may sort by last element
    pub timeline: Vec<TimelineEntry>,
    /// Ordered free-text suggested actions
    pub recommendations: Vec<String>,
}

impl ReviewCase {
    /// Create a case with an empty timeline
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        app_id: impl Into<AppId>,
        priority: CasePriority,
        confidence: f64,
        impact: f64,
    ) -> Self {
        Self {
            id: id.into(),
            app_id: app_id.into(),
            priority,
            confidence: confidence.clamp(0.0, 1.0),
            impact: impact.clamp(0.0, 1.0),
            timeline: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// With a timeline entry
    #[inline]
    #[must_use]
    pub fn with_event(mut self, ts: DateTime<Utc>, event: impl Into<String>) -> Self {
        self.timeline.push(TimelineEntry {
            ts,
            event: event.into(),
        });
        self
    }

    /// With a recommendation
    #[inline]
    #[must_use]
    pub fn with_recommendation(mut self, rec: impl Into<String>) -> Self {
        self.recommendations.push(rec.into());
        self
    }
}
