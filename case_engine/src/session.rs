//! Case session - the single in-memory store a host drives.
//!
//! Owns the authored content, evidence state (with the token ledger), the
//! case-file puzzle, interrogations and card image tracking.

use case_rules::{
    CaseContent, ConfigError, EngineConfig, LineOfInquiryId, ObjectId, StoryObject, StoryTime,
    SuspectId,
};
use std::collections::HashMap;

use crate::accusation::{AccusationFlow, AccusationPhase, EvidenceScope};
use crate::case_file::CaseFilePuzzle;
use crate::collaborators::{CaseEvaluator, DialogueService};
use crate::error::InterrogationError;
use crate::evidence_store::{ActionResult, EvidenceAction, EvidenceOutcome, EvidenceState};
use crate::images::CardImages;
use crate::interrogation::{DialogueTurn, InquiryOutcome, InterrogationSession};
use crate::selectors::{compute_mmo_progress, derive_timeline_nodes, MmoProgress, TimelineNode};

/// The result of questioning a suspect through the session.
#[derive(Debug, Clone, PartialEq)]
pub struct InterrogationResult {
    pub turn: DialogueTurn,
    /// Testimony card registered from the reply's insight.
    pub testimony_id: Option<ObjectId>,
}

/// A play session over one case.
#[derive(Debug, Clone)]
pub struct CaseSession {
    content: CaseContent,
    config: EngineConfig,
    evidence: EvidenceState,
    case_file: CaseFilePuzzle,
    interrogations: HashMap<SuspectId, InterrogationSession>,
    images: CardImages,
}

impl CaseSession {
    /// Open a session. Suspects with a physical description get a mugshot card.
    ///
    /// Content problems are logged and left in place; malformed entries are
    /// skipped wherever they are read.
    pub fn new(content: CaseContent, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let issues = content.validate();
        if !issues.is_empty() {
            tracing::warn!(title = %content.title, issues = issues.len(), "Case content has problems");
        }

        let evidence = Self::opening_evidence(&content, &config);
        let case_file = CaseFilePuzzle::new(content.case_file.clone(), config.placement_feedback());

        tracing::info!(
            title = %content.title,
            objects = evidence.object_count(),
            tokens = config.starting_tokens,
            "Case session opened"
        );

        Ok(Self {
            content,
            config,
            evidence,
            case_file,
            interrogations: HashMap::new(),
            images: CardImages::new(),
        })
    }

    fn opening_evidence(content: &CaseContent, config: &EngineConfig) -> EvidenceState {
        let mut evidence = EvidenceState::new(content, config);
        for suspect in &content.suspects {
            if suspect.physical_description.is_empty() {
                continue;
            }
            let mugshot = StoryObject::mugshot(suspect);
            if evidence.object(&mugshot.id).is_none() {
                evidence.apply(EvidenceAction::RegisterObject(mugshot));
            }
        }
        evidence
    }

    /// Return every part of the session to its opening state.
    pub fn reset(&mut self) {
        self.evidence = Self::opening_evidence(&self.content, &self.config);
        self.case_file.reset();
        self.interrogations.clear();
        self.images.clear();
        tracing::info!(
            title = %self.content.title,
            tokens = self.evidence.ledger().initial(),
            "Case session reset"
        );
    }

    // =========================================================================
    // Evidence
    // =========================================================================

    pub fn dispatch(&mut self, action: EvidenceAction) -> ActionResult {
        self.evidence.apply(action)
    }

    pub fn evidence(&self) -> &EvidenceState {
        &self.evidence
    }

    pub fn content(&self) -> &CaseContent {
        &self.content
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn balance(&self) -> u32 {
        self.evidence.balance()
    }

    /// Current evidence grouped into stacks and singles.
    pub fn timeline_nodes(&self) -> Vec<TimelineNode<'_>> {
        let evidence = self.evidence.evidence();
        derive_timeline_nodes(&evidence, &self.content.stacks)
    }

    /// MMO progress from the evidence attached to a suspect.
    pub fn mmo_progress(&self, suspect_id: &SuspectId) -> MmoProgress {
        compute_mmo_progress(
            self.evidence.evidence_for_suspect(suspect_id),
            self.evidence.objects(),
        )
    }

    // =========================================================================
    // Case file
    // =========================================================================

    pub fn case_file(&self) -> &CaseFilePuzzle {
        &self.case_file
    }

    pub fn case_file_mut(&mut self) -> &mut CaseFilePuzzle {
        &mut self.case_file
    }

    // =========================================================================
    // Interrogation
    // =========================================================================

    pub fn interrogation(&self, suspect_id: &SuspectId) -> Option<&InterrogationSession> {
        self.interrogations.get(suspect_id)
    }

    /// Open a line of inquiry against its suspect, paying from the ledger.
    pub fn open_line(&mut self, line_id: &LineOfInquiryId) -> InquiryOutcome {
        let Some(line) = self.content.line_of_inquiry(line_id) else {
            return InquiryOutcome::UnknownLine {
                line_id: line_id.clone(),
            };
        };
        let session = self
            .interrogations
            .entry(line.suspect_id.clone())
            .or_insert_with(|| InterrogationSession::new(line.suspect_id.clone()));
        session.open_line(self.evidence.ledger_mut(), line)
    }

    /// Questions of a line, available once the line has been opened.
    pub fn questions(&self, line_id: &LineOfInquiryId) -> Option<&[String]> {
        let line = self.content.line_of_inquiry(line_id)?;
        self.interrogations
            .get(&line.suspect_id)
            .filter(|session| session.is_line_open(line_id))
            .map(|_| line.questions.as_slice())
    }

    /// Question a suspect along an opened line of inquiry. An insight in the
    /// reply is registered as a testimony card timestamped `told_at`.
    pub async fn interrogate(
        &mut self,
        service: &dyn DialogueService,
        line_id: &LineOfInquiryId,
        text: &str,
        told_at: StoryTime,
    ) -> Result<InterrogationResult, InterrogationError> {
        let Some(line) = self.content.line_of_inquiry(line_id) else {
            return Err(InterrogationError::UnknownLine(line_id.clone()));
        };
        let suspect_id = line.suspect_id.clone();
        if self.content.suspect(&suspect_id).is_none() {
            return Err(InterrogationError::UnknownSuspect(suspect_id));
        }

        let session = self
            .interrogations
            .entry(suspect_id.clone())
            .or_insert_with(|| InterrogationSession::new(suspect_id.clone()));
        let turn = session.ask(service, line_id, text).await?;

        let testimony_id = match &turn.insight {
            Some(insight) => {
                let testimony = StoryObject::testimony(&suspect_id, insight.clone(), told_at);
                match self.evidence.apply(EvidenceAction::RegisterObject(testimony)).outcome {
                    EvidenceOutcome::Registered { object_id } => Some(object_id),
                    _ => None,
                }
            }
            None => None,
        };

        Ok(InterrogationResult { turn, testimony_id })
    }

    // =========================================================================
    // Accusation
    // =========================================================================

    /// Start an accusation against a known suspect.
    pub fn begin_accusation(&self, suspect_id: &SuspectId, scope: EvidenceScope) -> Option<AccusationFlow> {
        let suspect = self.content.suspect(suspect_id)?;
        Some(AccusationFlow::begin(&self.evidence, suspect, scope))
    }

    /// Submit (or resubmit) an accusation against the canonical timeline.
    pub async fn submit_accusation(
        &self,
        flow: &mut AccusationFlow,
        evaluator: &dyn CaseEvaluator,
    ) -> AccusationPhase {
        flow.submit(evaluator, &self.content.canonical_timeline)
            .await
            .clone()
    }

    // =========================================================================
    // Images
    // =========================================================================

    pub fn images(&self) -> &CardImages {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut CardImages {
        &mut self.images
    }
}
