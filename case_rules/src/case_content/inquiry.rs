//! Lines of inquiry - themed question clusters gated by a token cost.

use serde::{Deserialize, Serialize};

use crate::entities::{LineOfInquiryId, SuspectId};

/// A themed set of interrogation questions pursued as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOfInquiry {
    pub id: LineOfInquiryId,
    pub suspect_id: SuspectId,
    pub title: String,
    /// Tokens charged the first time the line is opened.
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub questions: Vec<String>,
}

impl LineOfInquiry {
    pub fn new(
        id: impl Into<LineOfInquiryId>,
        suspect_id: impl Into<SuspectId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            suspect_id: suspect_id.into(),
            title: title.into(),
            cost: 0,
            questions: Vec::new(),
        }
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.questions.push(question.into());
        self
    }
}
