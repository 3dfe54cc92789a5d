//! Acting personas
//!
//! Volatile process-lifetime role setting. Authorization stays a
//! presentation-layer concern: the engine records the persona but its
//! mutator API does not check it. UI hosts gate remediation controls on
//! [`Persona::can_remediate`].

use serde::{Deserialize, Serialize};

/// The acting role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    /// Security operations: full access
    SecOps,
    /// Executive read-only view
    CISO,
}

impl Persona {
    /// Whether this persona may trigger remediation mutators
    #[inline]
    #[must_use]
    pub fn can_remediate(self) -> bool {
        matches!(self, Persona::SecOps)
    }

    /// Display label
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Persona::SecOps => "SecOps",
            Persona::CISO => "CISO",
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Persona::SecOps
    }
}
