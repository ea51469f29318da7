//! Error types for loading case content and configuration.

use thiserror::Error;

use crate::entities::{ObjectId, SlotId, SuspectId};

/// Errors raised while loading authored case content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to parse case content: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate object id: {0}")]
    DuplicateObject(ObjectId),

    #[error("Duplicate suspect id: {0}")]
    DuplicateSuspect(SuspectId),

    #[error("Duplicate case-file slot id: {0}")]
    DuplicateSlot(SlotId),
}

/// Errors raised while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
