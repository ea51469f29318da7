//! Error types for the engine's external boundaries.

use case_rules::{LineOfInquiryId, SuspectId};
use thiserror::Error;

/// Failure reported by an external collaborator (AI service, image service).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Service unavailable")]
    Unavailable,
}

/// Why an accusation could not be evaluated.
///
/// This is never a verdict: the player may retry or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationFailure {
    #[error("Evaluator returned no result")]
    NoResult,
    #[error("Evaluator failed: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Errors raised while interrogating a suspect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterrogationError {
    #[error("Unknown suspect: {0}")]
    UnknownSuspect(SuspectId),
    #[error("Unknown line of inquiry: {0}")]
    UnknownLine(LineOfInquiryId),
    #[error("Line of inquiry {0} has not been opened")]
    LineNotOpen(LineOfInquiryId),
    #[error("Interrogation of {0} is already complete")]
    Completed(SuspectId),
    #[error("Dialogue service failed: {0}")]
    Collaborator(#[from] CollaboratorError),
}
