//! Engine configuration

use serde::{Deserialize, Serialize};
use shadow_model::Persona;

/// Engine construction options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed the demo inventory and review cases at construction
    pub seed_demo_data: bool,
    /// Initial acting persona (volatile; resets every construction)
    pub initial_persona: Persona,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an empty inventory (tests, imports)
    #[inline]
    #[must_use]
    pub fn without_seed(mut self) -> Self {
        self.seed_demo_data = false;
        self
    }

    /// With initial persona
    #[inline]
    #[must_use]
    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.initial_persona = persona;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            initial_persona: Persona::SecOps,
        }
    }
}
