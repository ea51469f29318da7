//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Token balance at the start of a session and after a reset.
    pub starting_tokens: u32,

    /// A milestone fires each time player-added evidence reaches a multiple of this.
    pub milestone_threshold: usize,

    /// How long an incorrect case-file placement stays flagged, in milliseconds.
    pub placement_feedback_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_tokens: 100,
            milestone_threshold: 5,
            placement_feedback_ms: 600,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.milestone_threshold == 0 {
            return Err(ConfigError::Invalid {
                field: "milestone_threshold",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn placement_feedback(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.placement_feedback_ms)
    }
}
