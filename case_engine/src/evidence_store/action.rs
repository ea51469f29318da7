//! Actions accepted by the evidence store and the outcomes they produce.

use case_rules::{ObjectId, StoryObject, SuspectId};
use serde::{Deserialize, Serialize};

use crate::events::CaseEvent;

/// Player or host actions against the evidence store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvidenceAction {
    /// Place an object on the timeline, paying its unlock cost the first time.
    AddToTimeline(ObjectId),
    /// Take an object off the timeline. No refund.
    RemoveFromTimeline(ObjectId),
    /// Toggle a suspect in the object's assignment set.
    AssignToSuspect {
        object_id: ObjectId,
        suspect_id: SuspectId,
    },
    /// Add an object created during play (testimony, mugshot) to the catalog.
    RegisterObject(StoryObject),
    /// Credit tokens to the ledger.
    GrantTokens(u32),
}

/// Why an action was refused. Refusals never change state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    InsufficientFunds {
        object_id: ObjectId,
        cost: u32,
        balance: u32,
    },
    UnknownObject(ObjectId),
    DuplicateObject(ObjectId),
}

/// What an action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceOutcome {
    /// First placement; the unlock cost was charged.
    Unlocked { object_id: ObjectId, cost: u32 },
    /// Re-placed after an earlier removal, free of charge.
    Restored { object_id: ObjectId },
    AlreadyActive { object_id: ObjectId },
    Removed { object_id: ObjectId },
    NotActive { object_id: ObjectId },
    AssignmentToggled {
        object_id: ObjectId,
        suspect_id: SuspectId,
        assigned: bool,
    },
    Registered { object_id: ObjectId },
    TokensGranted { amount: u32, balance: u32 },
    Rejected(Rejection),
}

impl EvidenceOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, EvidenceOutcome::Rejected(_))
    }
}

/// The outcome of one action plus any notifications it raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub outcome: EvidenceOutcome,
    pub events: Vec<CaseEvent>,
}

impl ActionResult {
    pub fn new(outcome: EvidenceOutcome) -> Self {
        Self {
            outcome,
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: CaseEvent) -> Self {
        self.events.push(event);
        self
    }
}

impl From<EvidenceOutcome> for ActionResult {
    fn from(outcome: EvidenceOutcome) -> Self {
        Self::new(outcome)
    }
}
