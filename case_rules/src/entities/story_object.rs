//! Story objects - the cards a player can unlock and place on the evidence timeline.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use super::{LocationId, ObjectId, Suspect, SuspectId};
use crate::mechanics::{CardType, MmoCategory, Rarity, StoryTime};

/// A discoverable object that can become evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub card_type: CardType,
    #[serde(default)]
    pub rarity: Rarity,

    /// Tokens charged the first time this object enters the timeline.
    #[serde(default)]
    pub cost_to_unlock: u32,

    /// Set once the unlock cost has been paid; never cleared.
    #[serde(default)]
    pub has_been_unlocked: bool,

    /// Currently placed on the timeline.
    #[serde(default)]
    pub is_evidence: bool,

    /// Placed on the timeline when the case opens; excluded from milestones.
    #[serde(default)]
    pub seeded: bool,

    #[serde(default)]
    pub tags: BTreeSet<MmoCategory>,

    #[serde(default)]
    pub assigned_to_suspect_ids: BTreeSet<SuspectId>,

    /// Chronological key within the story.
    #[serde(default)]
    pub timestamp: StoryTime,

    /// Where the object was found.
    #[serde(default)]
    pub location_id: Option<LocationId>,

    /// The character this card is about (mugshots, testimony).
    #[serde(default)]
    pub subject_id: Option<SuspectId>,

    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl StoryObject {
    /// Create a free, untagged object with the given id and name.
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            card_type: CardType::Object,
            rarity: Rarity::Irrelevant,
            cost_to_unlock: 0,
            has_been_unlocked: false,
            is_evidence: false,
            seeded: false,
            tags: BTreeSet::new(),
            assigned_to_suspect_ids: BTreeSet::new(),
            timestamp: StoryTime::default(),
            location_id: None,
            subject_id: None,
            metadata: HashMap::new(),
        }
    }

    /// Convert a statement obtained in an interrogation into a testimony card.
    pub fn testimony(speaker: &SuspectId, statement: impl Into<String>, told_at: StoryTime) -> Self {
        let statement = statement.into();
        let mut object = Self::new(
            ObjectId::new(format!("testimony-{}", Uuid::new_v4())),
            format!("Testimony of {}", speaker),
        )
        .with_card_type(CardType::Testimony)
        .with_rarity(Rarity::Circumstantial)
        .with_timestamp(told_at)
        .with_description(statement);
        object.subject_id = Some(speaker.clone());
        object
    }

    /// Derive a mugshot card from a suspect's physical description.
    pub fn mugshot(suspect: &Suspect) -> Self {
        let mut object = Self::new(
            ObjectId::new(format!("mugshot-{}", suspect.id)),
            format!("Mugshot: {}", suspect.name),
        )
        .with_card_type(CardType::Mugshot)
        .with_rarity(Rarity::Circumstantial)
        .with_description(suspect.physical_description.clone());
        object.subject_id = Some(suspect.id.clone());
        object
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_card_type(mut self, card_type: CardType) -> Self {
        self.card_type = card_type;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the unlock cost.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost_to_unlock = cost;
        self
    }

    /// Add an evidentiary tag.
    pub fn with_tag(mut self, tag: MmoCategory) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = MmoCategory>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn with_timestamp(mut self, timestamp: StoryTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_location(mut self, location_id: impl Into<LocationId>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    /// Mark the object as part of the opening evidence.
    pub fn seeded(mut self) -> Self {
        self.seeded = true;
        self
    }

    pub fn has_tag(&self, tag: MmoCategory) -> bool {
        self.tags.contains(&tag)
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }

    pub fn is_assigned_to(&self, suspect_id: &SuspectId) -> bool {
        self.assigned_to_suspect_ids.contains(suspect_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_builder() {
        let object = StoryObject::new("knife", "Kitchen knife")
            .with_cost(15)
            .with_rarity(Rarity::Critical)
            .with_tag(MmoCategory::Means)
            .with_location("kitchen")
            .with_timestamp(StoryTime::new(1, 22, 10));

        assert_eq!(object.id, ObjectId::new("knife"));
        assert_eq!(object.cost_to_unlock, 15);
        assert!(object.has_tag(MmoCategory::Means));
        assert!(!object.has_tag(MmoCategory::Motive));
        assert!(object.is_tagged());
        assert!(!object.has_been_unlocked);
        assert!(!object.is_evidence);
        assert_eq!(object.location_id, Some(LocationId::new("kitchen")));
    }

    #[test]
    fn test_testimony_ids_are_unique() {
        let speaker = SuspectId::new("maid");
        let time = StoryTime::new(2, 9, 0);
        let first = StoryObject::testimony(&speaker, "I heard a scream", time);
        let second = StoryObject::testimony(&speaker, "I heard a scream", time);

        assert_ne!(first.id, second.id);
        assert!(first.id.as_str().starts_with("testimony-"));
        assert_eq!(first.card_type, CardType::Testimony);
        assert_eq!(first.cost_to_unlock, 0);
        assert_eq!(first.subject_id, Some(speaker));
        assert_eq!(first.description, "I heard a scream");
    }

    #[test]
    fn test_mugshot_from_suspect() {
        let suspect = Suspect::new("butler", "Mr. Graves")
            .with_physical_description("Tall, grey-haired, a scar over the left eye");
        let mugshot = StoryObject::mugshot(&suspect);

        assert_eq!(mugshot.id, ObjectId::new("mugshot-butler"));
        assert_eq!(mugshot.card_type, CardType::Mugshot);
        assert!(mugshot.description.contains("scar"));
        assert_eq!(mugshot.subject_id, Some(SuspectId::new("butler")));
    }
}
