//! Notifications emitted by the engine for the host to present.

use case_rules::SuspectId;
use serde::{Deserialize, Serialize};

/// One-shot notifications raised by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseEvent {
    /// Player-added evidence reached a multiple of the milestone threshold.
    MilestoneReached { evidence_count: usize },

    /// The last empty case-file slot was filled.
    CaseFileCompleted { score: u32 },

    /// The dialogue service reported an interrogation as finished.
    InterrogationCompleted { suspect_id: SuspectId },
}
