//! Case-file puzzle layout: clues, slots and the per-category timeline anchors.

use serde::{Deserialize, Serialize};

use crate::entities::{ClueId, SlotId};
use crate::mechanics::MmoCategory;

/// Whether a clue fills an anchor's primary slot or one of its supporting slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClueKind {
    Primary,
    Supporting,
}

/// A clue card that can be placed into the case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub id: ClueId,
    /// Key matched against a slot's `correct_event_key`.
    pub event_key: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ClueKind,
    pub category: MmoCategory,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub bonus_points: Option<u32>,
}

impl Clue {
    pub fn primary(
        id: impl Into<ClueId>,
        event_key: impl Into<String>,
        category: MmoCategory,
        points: u32,
    ) -> Self {
        Self {
            id: id.into(),
            event_key: event_key.into(),
            text: String::new(),
            kind: ClueKind::Primary,
            category,
            points,
            bonus_points: None,
        }
    }

    pub fn supporting(
        id: impl Into<ClueId>,
        event_key: impl Into<String>,
        category: MmoCategory,
        points: u32,
    ) -> Self {
        Self {
            kind: ClueKind::Supporting,
            ..Self::primary(id, event_key, category, points)
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_bonus(mut self, bonus_points: u32) -> Self {
        self.bonus_points = Some(bonus_points);
        self
    }

    /// Points awarded for a correct placement.
    pub fn award(&self) -> u32 {
        self.points.saturating_add(self.bonus_points.unwrap_or(0))
    }
}

/// A slot in the case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSlot {
    pub slot_id: SlotId,
    #[serde(default)]
    pub correct_event_key: Option<String>,
    #[serde(default)]
    pub placed_clue_id: Option<ClueId>,
}

impl EvidenceSlot {
    pub fn new(slot_id: impl Into<SlotId>) -> Self {
        Self {
            slot_id: slot_id.into(),
            correct_event_key: None,
            placed_clue_id: None,
        }
    }

    pub fn expecting(mut self, event_key: impl Into<String>) -> Self {
        self.correct_event_key = Some(event_key.into());
        self
    }

    pub fn is_filled(&self) -> bool {
        self.placed_clue_id.is_some()
    }
}

/// One anchor per category: a primary slot plus supporting slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineAnchor {
    pub id: MmoCategory,
    #[serde(default)]
    pub title: String,
    pub primary: EvidenceSlot,
    #[serde(default)]
    pub supporting: Vec<EvidenceSlot>,
}

impl TimelineAnchor {
    pub fn new(id: MmoCategory, primary: EvidenceSlot) -> Self {
        Self {
            id,
            title: String::new(),
            primary,
            supporting: Vec::new(),
        }
    }

    pub fn with_supporting(mut self, slot: EvidenceSlot) -> Self {
        self.supporting.push(slot);
        self
    }

    pub fn has_supporting_slot(&self, slot_id: &SlotId) -> bool {
        self.supporting.iter().any(|s| &s.slot_id == slot_id)
    }

    /// Primary slot first, then supporting slots in order.
    pub fn slots(&self) -> impl Iterator<Item = &EvidenceSlot> {
        std::iter::once(&self.primary).chain(self.supporting.iter())
    }

    pub fn slot_mut(&mut self, slot_id: &SlotId) -> Option<&mut EvidenceSlot> {
        if &self.primary.slot_id == slot_id {
            return Some(&mut self.primary);
        }
        self.supporting.iter_mut().find(|s| &s.slot_id == slot_id)
    }
}

/// The authored case file: anchors and the master clue collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CaseFileLayout {
    #[serde(default)]
    pub anchors: Vec<TimelineAnchor>,
    #[serde(default)]
    pub clues: Vec<Clue>,
}

impl CaseFileLayout {
    pub fn anchor(&self, category: MmoCategory) -> Option<&TimelineAnchor> {
        self.anchors.iter().find(|a| a.id == category)
    }

    pub fn clue(&self, id: &ClueId) -> Option<&Clue> {
        self.clues.iter().find(|c| &c.id == id)
    }

    /// Every slot across all anchors.
    pub fn slots(&self) -> impl Iterator<Item = &EvidenceSlot> {
        self.anchors.iter().flat_map(|a| a.slots())
    }

    /// Find the anchor owning a slot.
    pub fn anchor_of_slot(&self, slot_id: &SlotId) -> Option<&TimelineAnchor> {
        self.anchors
            .iter()
            .find(|a| a.slots().any(|s| &s.slot_id == slot_id))
    }

    pub fn slot(&self, slot_id: &SlotId) -> Option<&EvidenceSlot> {
        self.slots().find(|s| &s.slot_id == slot_id)
    }
}
