//! The canonical timeline - authored ground truth an accusation is scored against.

use serde::{Deserialize, Serialize};

use crate::entities::{ObjectId, SuspectId};

/// One event of the true sequence, anchored to the object that proves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub object_id: ObjectId,
    pub description: String,
}

/// The true culprit and the key events of the crime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CanonicalTimeline {
    pub culprit_id: SuspectId,
    #[serde(default)]
    pub key_events: Vec<KeyEvent>,
}

impl CanonicalTimeline {
    pub fn new(culprit_id: impl Into<SuspectId>) -> Self {
        Self {
            culprit_id: culprit_id.into(),
            key_events: Vec::new(),
        }
    }

    pub fn with_event(mut self, object_id: impl Into<ObjectId>, description: impl Into<String>) -> Self {
        self.key_events.push(KeyEvent {
            object_id: object_id.into(),
            description: description.into(),
        });
        self
    }

    pub fn is_culprit(&self, suspect_id: &SuspectId) -> bool {
        &self.culprit_id == suspect_id
    }

    /// Object ids of the key events, in chronological order.
    pub fn key_object_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.key_events.iter().map(|e| &e.object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_timeline() {
        let canon = CanonicalTimeline::new("gardener")
            .with_event("ledger", "Debts revealed")
            .with_event("shears", "Weapon taken from the shed");

        assert!(canon.is_culprit(&SuspectId::new("gardener")));
        assert!(!canon.is_culprit(&SuspectId::new("butler")));

        let ids: Vec<_> = canon.key_object_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["ledger", "shears"]);
    }
}
