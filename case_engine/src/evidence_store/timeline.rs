//! Timeline entries - the list mirroring objects currently placed as evidence.

use case_rules::{CardType, LocationId, ObjectId, StoryObject};
use serde::{Deserialize, Serialize};

/// One object on the evidence timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Derived id, `ev-<objectId>`.
    pub id: String,
    pub card_id: ObjectId,
    pub card_type: CardType,
    /// Session sequence number at which the entry was added.
    pub timestamp_collected: u64,
    pub location_id: Option<LocationId>,
}

impl TimelineEntry {
    pub fn for_object(object: &StoryObject, timestamp_collected: u64) -> Self {
        Self {
            id: object.id.evidence_entry_id(),
            card_id: object.id.clone(),
            card_type: object.card_type,
            timestamp_collected,
            location_id: object.location_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_for_object() {
        let object = StoryObject::new("lamp", "Broken lamp").with_location("hallway");
        let entry = TimelineEntry::for_object(&object, 7);

        assert_eq!(entry.id, "ev-lamp");
        assert_eq!(entry.card_id, ObjectId::new("lamp"));
        assert_eq!(entry.card_type, CardType::Object);
        assert_eq!(entry.timestamp_collected, 7);
        assert_eq!(entry.location_id, Some(LocationId::new("hallway")));
    }
}
