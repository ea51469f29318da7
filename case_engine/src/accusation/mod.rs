//! Accusation flow: `Review -> Evaluating -> Results`.
//!
//! An evaluator failure lands in [`AccusationPhase::Failed`], never in a
//! verdict. From there the player can retry the same submission or cancel
//! back to review.

use case_rules::{CanonicalTimeline, ObjectId, StoryObject, Suspect, SuspectId};

use crate::collaborators::{CaseEvaluator, Evaluation, NarrativeSummarizer, Submission, Verdict};
use crate::error::{CollaboratorError, EvaluationFailure};
use crate::evidence_store::EvidenceState;

/// Which evidence enters the accusation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvidenceScope {
    /// Only evidence the player attached to the accused.
    #[default]
    AssignedToSuspect,
    /// Everything currently on the timeline.
    AllCollected,
}

/// Evidence gathered for review before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub evidence_ids: Vec<ObjectId>,
    /// Narrative summary, once the summarizer has produced one.
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccusationPhase {
    Review(Review),
    Evaluating(Submission),
    Results(Evaluation),
    Failed {
        submission: Submission,
        failure: EvaluationFailure,
    },
}

/// One accusation against one suspect.
#[derive(Debug, Clone)]
pub struct AccusationFlow {
    suspect_id: SuspectId,
    suspect_name: String,
    phase: AccusationPhase,
}

impl AccusationFlow {
    /// Open the review step with evidence selected by `scope`.
    pub fn begin(evidence: &EvidenceState, suspect: &Suspect, scope: EvidenceScope) -> Self {
        let selected = match scope {
            EvidenceScope::AssignedToSuspect => evidence.evidence_for_suspect(&suspect.id),
            EvidenceScope::AllCollected => evidence.evidence(),
        };
        tracing::debug!(
            suspect_id = %suspect.id,
            evidence = selected.len(),
            ?scope,
            "Accusation review opened"
        );

        Self {
            suspect_id: suspect.id.clone(),
            suspect_name: suspect.display_name(),
            phase: AccusationPhase::Review(Review {
                evidence_ids: selected.into_iter().map(|o| o.id.clone()).collect(),
                summary: None,
            }),
        }
    }

    pub fn phase(&self) -> &AccusationPhase {
        &self.phase
    }

    pub fn suspect_id(&self) -> &SuspectId {
        &self.suspect_id
    }

    /// The evaluator's result, once in `Results`.
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match &self.phase {
            AccusationPhase::Results(evaluation) => Some(evaluation),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&EvaluationFailure> {
        match &self.phase {
            AccusationPhase::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Ask the summarizer to narrate the reviewed evidence.
    ///
    /// Only meaningful during review; a failed summary leaves the review as is.
    pub async fn summarize(
        &mut self,
        summarizer: &dyn NarrativeSummarizer,
        evidence: &EvidenceState,
    ) -> Result<(), CollaboratorError> {
        let AccusationPhase::Review(review) = &mut self.phase else {
            return Ok(());
        };

        let objects: Vec<StoryObject> = review
            .evidence_ids
            .iter()
            .filter_map(|id| evidence.object(id).cloned())
            .collect();

        let summary = summarizer.summarize(&objects, &self.suspect_name).await?;
        review.summary = Some(summary);
        Ok(())
    }

    /// Submit the reviewed evidence, or resubmit after a failure.
    pub async fn submit(
        &mut self,
        evaluator: &dyn CaseEvaluator,
        canon: &CanonicalTimeline,
    ) -> &AccusationPhase {
        let submission = match &self.phase {
            AccusationPhase::Review(review) => Submission {
                suspect_id: self.suspect_id.clone(),
                evidence_ids: review.evidence_ids.clone(),
            },
            AccusationPhase::Failed { submission, .. } => submission.clone(),
            AccusationPhase::Evaluating(_) | AccusationPhase::Results(_) => return &self.phase,
        };

        self.phase = AccusationPhase::Evaluating(submission.clone());

        let result = evaluator
            .evaluate(&submission, canon, &self.suspect_name)
            .await;

        self.phase = match result {
            Ok(Some(evaluation)) => {
                let expected = Verdict::expected_for_score(evaluation.score);
                if expected != evaluation.verdict {
                    tracing::warn!(
                        score = evaluation.score,
                        verdict = ?evaluation.verdict,
                        expected = ?expected,
                        "Evaluator verdict disagrees with score band"
                    );
                }
                tracing::info!(
                    suspect_id = %self.suspect_id,
                    verdict = ?evaluation.verdict,
                    score = evaluation.score,
                    "Accusation evaluated"
                );
                AccusationPhase::Results(evaluation)
            }
            Ok(None) => {
                tracing::warn!(suspect_id = %self.suspect_id, "Evaluator returned no result");
                AccusationPhase::Failed {
                    submission,
                    failure: EvaluationFailure::NoResult,
                }
            }
            Err(e) => {
                tracing::warn!(suspect_id = %self.suspect_id, error = %e, "Evaluation failed");
                AccusationPhase::Failed {
                    submission,
                    failure: EvaluationFailure::from(e),
                }
            }
        };

        &self.phase
    }

    /// Resubmit after a failure. Does nothing in other phases.
    pub async fn retry(
        &mut self,
        evaluator: &dyn CaseEvaluator,
        canon: &CanonicalTimeline,
    ) -> &AccusationPhase {
        if matches!(self.phase, AccusationPhase::Failed { .. }) {
            return self.submit(evaluator, canon).await;
        }
        &self.phase
    }

    /// Return to review from a failed or interrupted evaluation.
    pub fn cancel(&mut self) {
        let evidence_ids = match &self.phase {
            AccusationPhase::Failed { submission, .. } | AccusationPhase::Evaluating(submission) => {
                submission.evidence_ids.clone()
            }
            AccusationPhase::Review(_) | AccusationPhase::Results(_) => return,
        };
        self.phase = AccusationPhase::Review(Review {
            evidence_ids,
            summary: None,
        });
    }
}
