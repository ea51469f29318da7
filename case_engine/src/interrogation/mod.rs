//! Interrogation sessions - token-gated lines of inquiry and dialogue progress.

use case_rules::{LineOfInquiry, LineOfInquiryId, SuspectId, TokenLedger};
use std::collections::BTreeSet;

use crate::collaborators::DialogueService;
use crate::error::InterrogationError;
use crate::events::CaseEvent;

/// Result of opening a line of inquiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquiryOutcome {
    Opened { line_id: LineOfInquiryId, cost: u32 },
    AlreadyOpen { line_id: LineOfInquiryId },
    /// The line belongs to another suspect.
    WrongSuspect { line_id: LineOfInquiryId },
    UnknownLine { line_id: LineOfInquiryId },
    InsufficientFunds { line_id: LineOfInquiryId, cost: u32, balance: u32 },
}

/// One question and the suspect's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub line_id: LineOfInquiryId,
    pub question: String,
    pub response: String,
}

/// What a single question produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueTurn {
    pub response: String,
    pub insight: Option<String>,
    pub progress: f32,
    pub event: Option<CaseEvent>,
}

/// Conversation state with one suspect.
#[derive(Debug, Clone, PartialEq)]
pub struct InterrogationSession {
    suspect_id: SuspectId,
    opened_lines: BTreeSet<LineOfInquiryId>,
    /// Progress from 0.0 to 1.0.
    progress: f32,
    completed: bool,
    suggested_followups: Vec<String>,
    transcript: Vec<Exchange>,
    insights: Vec<String>,
}

impl InterrogationSession {
    pub fn new(suspect_id: SuspectId) -> Self {
        Self {
            suspect_id,
            opened_lines: BTreeSet::new(),
            progress: 0.0,
            completed: false,
            suggested_followups: Vec::new(),
            transcript: Vec::new(),
            insights: Vec::new(),
        }
    }

    /// Open a line of inquiry, paying its cost the first time.
    ///
    /// An unaffordable line is refused without touching the ledger.
    pub fn open_line(&mut self, ledger: &mut TokenLedger, line: &LineOfInquiry) -> InquiryOutcome {
        let line_id = line.id.clone();
        if line.suspect_id != self.suspect_id {
            return InquiryOutcome::WrongSuspect { line_id };
        }
        if self.opened_lines.contains(&line_id) {
            return InquiryOutcome::AlreadyOpen { line_id };
        }
        if !ledger.can_afford(line.cost) {
            tracing::debug!(line_id = %line_id, cost = line.cost, balance = ledger.balance(), "Line of inquiry refused");
            return InquiryOutcome::InsufficientFunds {
                line_id,
                cost: line.cost,
                balance: ledger.balance(),
            };
        }

        ledger.debit(line.cost);
        self.opened_lines.insert(line_id.clone());
        tracing::info!(suspect_id = %self.suspect_id, line_id = %line_id, cost = line.cost, "Line of inquiry opened");
        InquiryOutcome::Opened {
            line_id,
            cost: line.cost,
        }
    }

    /// Put a question along an opened line of inquiry and apply the reply.
    ///
    /// Questions on lines that were never opened are refused before the
    /// service is called. A service failure leaves the session unchanged.
    pub async fn ask(
        &mut self,
        service: &dyn DialogueService,
        line_id: &LineOfInquiryId,
        text: &str,
    ) -> Result<DialogueTurn, InterrogationError> {
        if self.completed {
            return Err(InterrogationError::Completed(self.suspect_id.clone()));
        }
        if !self.opened_lines.contains(line_id) {
            tracing::debug!(suspect_id = %self.suspect_id, line_id = %line_id, "Question refused: line not open");
            return Err(InterrogationError::LineNotOpen(line_id.clone()));
        }

        let reply = service.send_message(&self.suspect_id, text).await?;

        let response = reply.response_chunks.concat();
        self.progress = (self.progress + reply.progress_delta).clamp(0.0, 1.0);
        self.suggested_followups = reply.suggested_followups;
        self.transcript.push(Exchange {
            line_id: line_id.clone(),
            question: text.to_string(),
            response: response.clone(),
        });
        if let Some(insight) = &reply.insight {
            self.insights.push(insight.clone());
        }

        let event = if reply.completed && !self.completed {
            self.completed = true;
            tracing::info!(suspect_id = %self.suspect_id, "Interrogation completed");
            Some(CaseEvent::InterrogationCompleted {
                suspect_id: self.suspect_id.clone(),
            })
        } else {
            None
        };

        Ok(DialogueTurn {
            response,
            insight: reply.insight,
            progress: self.progress,
            event,
        })
    }

    pub fn suspect_id(&self) -> &SuspectId {
        &self.suspect_id
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_line_open(&self, line_id: &LineOfInquiryId) -> bool {
        self.opened_lines.contains(line_id)
    }

    pub fn suggested_followups(&self) -> &[String] {
        &self.suggested_followups
    }

    pub fn transcript(&self) -> &[Exchange] {
        &self.transcript
    }

    pub fn insights(&self) -> &[String] {
        &self.insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{DialogueReply, MockDialogueService};
    use crate::error::CollaboratorError;

    fn line(cost: u32) -> LineOfInquiry {
        LineOfInquiry::new("alibi", "groom", "Your whereabouts").with_cost(cost)
    }

    fn alibi() -> LineOfInquiryId {
        LineOfInquiryId::new("alibi")
    }

    fn opened_session() -> InterrogationSession {
        let mut session = InterrogationSession::new(SuspectId::new("groom"));
        session.open_line(&mut TokenLedger::new(0), &line(0));
        session
    }

    #[test]
    fn test_open_line_charges_once() {
        let mut ledger = TokenLedger::new(10);
        let mut session = InterrogationSession::new(SuspectId::new("groom"));

        let first = session.open_line(&mut ledger, &line(4));
        assert!(matches!(first, InquiryOutcome::Opened { cost: 4, .. }));
        assert_eq!(ledger.balance(), 6);

        let second = session.open_line(&mut ledger, &line(4));
        assert!(matches!(second, InquiryOutcome::AlreadyOpen { .. }));
        assert_eq!(ledger.balance(), 6);
        assert!(session.is_line_open(&LineOfInquiryId::new("alibi")));
    }

    #[test]
    fn test_open_line_insufficient_funds() {
        let mut ledger = TokenLedger::new(3);
        let mut session = InterrogationSession::new(SuspectId::new("groom"));

        let outcome = session.open_line(&mut ledger, &line(4));
        assert_eq!(
            outcome,
            InquiryOutcome::InsufficientFunds {
                line_id: LineOfInquiryId::new("alibi"),
                cost: 4,
                balance: 3,
            }
        );
        assert_eq!(ledger.balance(), 3);
        assert!(!session.is_line_open(&LineOfInquiryId::new("alibi")));
    }

    #[test]
    fn test_open_line_for_other_suspect() {
        let mut ledger = TokenLedger::new(10);
        let mut session = InterrogationSession::new(SuspectId::new("cook"));

        let outcome = session.open_line(&mut ledger, &line(4));
        assert!(matches!(outcome, InquiryOutcome::WrongSuspect { .. }));
        assert_eq!(ledger.balance(), 10);
    }

    #[tokio::test]
    async fn test_ask_applies_reply() {
        let mut service = MockDialogueService::new();
        service.expect_send_message().returning(|_, _| {
            Ok(DialogueReply {
                response_chunks: vec!["I was ".to_string(), "in the stables.".to_string()],
                suggested_followups: vec!["Who saw you?".to_string()],
                progress_delta: 0.7,
                completed: false,
                insight: Some("The groom was in the stables at ten".to_string()),
            })
        });

        let mut session = opened_session();
        let turn = session.ask(&service, &alibi(), "Where were you?").await.unwrap();

        assert_eq!(turn.response, "I was in the stables.");
        assert!(turn.insight.is_some());
        assert!(turn.event.is_none());
        assert!((session.progress() - 0.7).abs() < 1e-6);
        assert_eq!(session.suggested_followups(), ["Who saw you?".to_string()]);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.insights().len(), 1);

        let turn = session.ask(&service, &alibi(), "And after?").await.unwrap();
        assert_eq!(turn.progress, 1.0);
    }

    #[tokio::test]
    async fn test_completion_closes_session() {
        let mut service = MockDialogueService::new();
        service.expect_send_message().times(1).returning(|_, _| {
            Ok(DialogueReply {
                response_chunks: vec!["Fine, I confess.".to_string()],
                progress_delta: 1.0,
                completed: true,
                ..DialogueReply::default()
            })
        });

        let mut session = opened_session();
        let turn = session.ask(&service, &alibi(), "The truth, please").await.unwrap();
        assert_eq!(
            turn.event,
            Some(CaseEvent::InterrogationCompleted {
                suspect_id: SuspectId::new("groom")
            })
        );

        let err = session.ask(&service, &alibi(), "Anything else?").await.unwrap_err();
        assert_eq!(err, InterrogationError::Completed(SuspectId::new("groom")));
    }

    #[tokio::test]
    async fn test_service_failure_leaves_session_unchanged() {
        let mut service = MockDialogueService::new();
        service
            .expect_send_message()
            .returning(|_, _| Err(CollaboratorError::RequestFailed("timeout".to_string())));

        let mut session = opened_session();
        let before = session.clone();
        let err = session.ask(&service, &alibi(), "Hello?").await.unwrap_err();

        assert!(matches!(err, InterrogationError::Collaborator(_)));
        assert_eq!(session, before);
    }

    #[tokio::test]
    async fn test_unopened_line_refused() {
        let mut service = MockDialogueService::new();
        service.expect_send_message().times(0);

        let mut ledger = TokenLedger::new(10);
        let mut session = InterrogationSession::new(SuspectId::new("groom"));
        let err = session.ask(&service, &alibi(), "Where were you?").await.unwrap_err();

        assert_eq!(err, InterrogationError::LineNotOpen(alibi()));
        assert!(session.transcript().is_empty());
        assert_eq!(ledger.balance(), 10);

        session.open_line(&mut ledger, &line(4));
        assert!(session.is_line_open(&alibi()));
        assert_eq!(ledger.balance(), 6);
    }
}
