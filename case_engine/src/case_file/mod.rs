//! Interactive case-file puzzle - placing clues into per-category slots.
//!
//! A clue is armed with [`CaseFilePuzzle::select_clue`] and then placed with
//! [`CaseFilePuzzle::place_in_slot`]. Incorrect placements are refused and
//! flagged for a short time so the host can show feedback; the clue stays
//! armed for another try.

use case_rules::{CaseFileLayout, Clue, ClueId, ClueKind, EvidenceSlot, SlotId};
use std::time::{Duration, Instant};

use crate::events::CaseEvent;

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    NoClueArmed,
    UnknownSlot(SlotId),
    SlotOccupied(SlotId),
    /// The clue does not belong in this slot.
    Incorrect { clue_id: ClueId, slot_id: SlotId },
}

/// Result of a placement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed {
        clue_id: ClueId,
        slot_id: SlotId,
        awarded: u32,
        /// Raised when this placement filled the last empty slot.
        event: Option<CaseEvent>,
    },
    Rejected(PlacementRejection),
}

/// Actions accepted by the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseFileAction {
    SelectClue(Option<ClueId>),
    PlaceInSlot { slot_id: SlotId, at: Instant },
    Reset,
}

/// Puzzle state: the live layout, armed clue, score and feedback flag.
#[derive(Debug, Clone)]
pub struct CaseFilePuzzle {
    initial: CaseFileLayout,
    layout: CaseFileLayout,
    armed: Option<ClueId>,
    score: u32,
    last_incorrect: Option<(SlotId, Instant)>,
    feedback: Duration,
}

impl CaseFilePuzzle {
    /// Start a puzzle from its authored layout.
    pub fn new(layout: CaseFileLayout, feedback: Duration) -> Self {
        Self {
            initial: layout.clone(),
            layout,
            armed: None,
            score: 0,
            last_incorrect: None,
            feedback,
        }
    }

    /// Apply one action. Returns a placement outcome for `PlaceInSlot`.
    pub fn apply(&mut self, action: CaseFileAction) -> Option<PlacementOutcome> {
        match action {
            CaseFileAction::SelectClue(clue_id) => {
                self.select_clue(clue_id);
                None
            }
            CaseFileAction::PlaceInSlot { slot_id, at } => Some(self.place_in_slot(&slot_id, at)),
            CaseFileAction::Reset => {
                self.reset();
                None
            }
        }
    }

    /// Arm a clue for placement, or disarm with `None`.
    ///
    /// Unknown or already placed clues are not armed; returns whether the
    /// selection was applied.
    pub fn select_clue(&mut self, clue_id: Option<ClueId>) -> bool {
        match clue_id {
            None => {
                self.armed = None;
                true
            }
            Some(id) => {
                if self.layout.clue(&id).is_none() || self.is_placed(&id) {
                    return false;
                }
                self.armed = Some(id);
                true
            }
        }
    }

    /// Place the armed clue into a slot.
    pub fn place_in_slot(&mut self, slot_id: &SlotId, at: Instant) -> PlacementOutcome {
        let Some(clue) = self.armed.as_ref().and_then(|id| self.layout.clue(id)).cloned() else {
            return PlacementOutcome::Rejected(PlacementRejection::NoClueArmed);
        };

        let Some(slot) = self.layout.slot(slot_id) else {
            tracing::debug!(slot_id = %slot_id, "Placement skipped: unknown slot");
            return PlacementOutcome::Rejected(PlacementRejection::UnknownSlot(slot_id.clone()));
        };

        if slot.is_filled() {
            return PlacementOutcome::Rejected(PlacementRejection::SlotOccupied(slot_id.clone()));
        }

        if !self.is_correct(&clue, slot) {
            tracing::debug!(clue_id = %clue.id, slot_id = %slot_id, "Incorrect placement");
            self.last_incorrect = Some((slot_id.clone(), at));
            return PlacementOutcome::Rejected(PlacementRejection::Incorrect {
                clue_id: clue.id,
                slot_id: slot_id.clone(),
            });
        }

        for anchor in &mut self.layout.anchors {
            if let Some(slot) = anchor.slot_mut(slot_id) {
                slot.placed_clue_id = Some(clue.id.clone());
                break;
            }
        }

        let awarded = clue.award();
        self.score = self.score.saturating_add(awarded);
        self.armed = None;
        self.last_incorrect = None;
        tracing::debug!(clue_id = %clue.id, slot_id = %slot_id, awarded, score = self.score, "Clue placed");

        let event = if self.is_complete() {
            tracing::info!(score = self.score, "Case file complete");
            Some(CaseEvent::CaseFileCompleted { score: self.score })
        } else {
            None
        };

        PlacementOutcome::Placed {
            clue_id: clue.id,
            slot_id: slot_id.clone(),
            awarded,
            event,
        }
    }

    fn is_correct(&self, clue: &Clue, slot: &EvidenceSlot) -> bool {
        match clue.kind {
            ClueKind::Primary => slot.correct_event_key.as_deref() == Some(clue.event_key.as_str()),
            ClueKind::Supporting => self
                .layout
                .anchor(clue.category)
                .map(|anchor| anchor.primary.is_filled() && anchor.has_supporting_slot(&slot.slot_id))
                .unwrap_or(false),
        }
    }

    fn is_placed(&self, clue_id: &ClueId) -> bool {
        self.layout
            .slots()
            .any(|s| s.placed_clue_id.as_ref() == Some(clue_id))
    }

    /// Every slot across all anchors holds a clue.
    pub fn is_complete(&self) -> bool {
        self.layout.slots().all(|s| s.is_filled())
    }

    /// The slot flagged by the last incorrect placement, while the flag is fresh.
    pub fn incorrect_slot(&self, now: Instant) -> Option<&SlotId> {
        self.last_incorrect
            .as_ref()
            .filter(|(_, at)| now.saturating_duration_since(*at) < self.feedback)
            .map(|(slot_id, _)| slot_id)
    }

    /// Drop the incorrect-placement flag once its display time has passed.
    pub fn clear_expired_feedback(&mut self, now: Instant) {
        if self.incorrect_slot(now).is_none() {
            self.last_incorrect = None;
        }
    }

    /// Restore the authored layout and zero the score.
    pub fn reset(&mut self) {
        self.layout = self.initial.clone();
        self.armed = None;
        self.score = 0;
        self.last_incorrect = None;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn armed_clue(&self) -> Option<&Clue> {
        self.armed.as_ref().and_then(|id| self.layout.clue(id))
    }

    pub fn layout(&self) -> &CaseFileLayout {
        &self.layout
    }

    /// Clues not yet placed. The master collection is never shrunk.
    pub fn unplaced_clues(&self) -> Vec<&Clue> {
        self.layout
            .clues
            .iter()
            .filter(|c| !self.is_placed(&c.id))
            .collect()
    }

    /// The clue placed in a slot, if any.
    pub fn clue_in_slot(&self, slot_id: &SlotId) -> Option<&Clue> {
        self.layout
            .slot(slot_id)
            .and_then(|s| s.placed_clue_id.as_ref())
            .and_then(|id| self.layout.clue(id))
    }
}
