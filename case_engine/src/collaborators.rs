//! Ports for the external services the engine consumes.
//!
//! The engine awaits these and applies their results; it never decides to
//! skip, retry or coalesce a request on its own.

use async_trait::async_trait;
use case_rules::{CanonicalTimeline, ObjectId, StoryObject, SuspectId};
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

// =============================================================================
// Images
// =============================================================================

/// Opaque reference to a resolved card image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle(pub String);

/// Resolution state of a card image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageStatus {
    Pending,
    Ready(ImageHandle),
    Failed(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn get_image(&self, card_id: &ObjectId) -> ImageStatus;
}

// =============================================================================
// Dialogue
// =============================================================================

/// A reply from the dialogue service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DialogueReply {
    pub response_chunks: Vec<String>,
    pub suggested_followups: Vec<String>,
    /// Change in interrogation progress, in the range -1.0..=1.0.
    pub progress_delta: f32,
    pub completed: bool,
    /// A statement worth recording as testimony.
    pub insight: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogueService: Send + Sync {
    async fn send_message(
        &self,
        persona: &SuspectId,
        text: &str,
    ) -> Result<DialogueReply, CollaboratorError>;
}

// =============================================================================
// Summary & evaluation
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NarrativeSummarizer: Send + Sync {
    async fn summarize(
        &self,
        evidence: &[StoryObject],
        suspect_name: &str,
    ) -> Result<String, CollaboratorError>;
}

/// What the player submits when accusing a suspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub suspect_id: SuspectId,
    pub evidence_ids: Vec<ObjectId>,
}

impl Submission {
    /// Serialize the submission for an evaluator request body.
    pub fn to_json(&self) -> Result<String, CollaboratorError> {
        serde_json::to_string(self).map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))
    }
}

/// Verdict tiers as reported by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    StrongCase,
    WeakCase,
    CaseRejected,
}

impl Verdict {
    /// The tier a score is expected to fall in (>85 strong, 50-85 weak, <50 rejected).
    ///
    /// Informational only; the evaluator's verdict is authoritative.
    pub fn expected_for_score(score: u32) -> Self {
        if score > 85 {
            Verdict::StrongCase
        } else if score >= 50 {
            Verdict::WeakCase
        } else {
            Verdict::CaseRejected
        }
    }
}

/// The evaluator's judgement of an accusation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub score: u32,
    pub reasoning: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaseEvaluator: Send + Sync {
    /// Judge a submission against the ground truth. `Ok(None)` means the
    /// evaluator produced nothing usable.
    async fn evaluate(
        &self,
        submission: &Submission,
        canon: &CanonicalTimeline,
        suspect_name: &str,
    ) -> Result<Option<Evaluation>, CollaboratorError>;
}
