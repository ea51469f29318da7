//! Content validation - reports malformed authored data without rejecting it.
//!
//! The engine skips malformed entries at runtime; these issues exist so
//! authors and tests can catch them early.

use std::collections::HashSet;
use thiserror::Error;

use super::{CaseContent, ClueKind};
use crate::entities::{ClueId, LineOfInquiryId, ObjectId, SuspectId};
use crate::mechanics::MmoCategory;

/// A problem found in authored case content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentIssue {
    #[error("Stack anchor {anchor_id} is not in the object catalog")]
    StackAnchorMissing { anchor_id: ObjectId },

    #[error("Stack {anchor_id} links {linked_id}, which is not in the object catalog")]
    StackLinkedMissing {
        anchor_id: ObjectId,
        linked_id: ObjectId,
    },

    #[error("Stack {anchor_id} has {total_slots} slots but needs at least {required}")]
    StackTooSmall {
        anchor_id: ObjectId,
        total_slots: usize,
        required: usize,
    },

    #[error("Canonical culprit {culprit_id} is not a known suspect")]
    UnknownCulprit { culprit_id: SuspectId },

    #[error("Canonical key event references unknown object {object_id}")]
    KeyEventUnknownObject { object_id: ObjectId },

    #[error("Clue {clue_id} has category {category} but the case file has no such anchor")]
    ClueWithoutAnchor {
        clue_id: ClueId,
        category: MmoCategory,
    },

    #[error("Primary clue {clue_id} matches no slot expecting event key {event_key}")]
    PrimaryClueWithoutSlot { clue_id: ClueId, event_key: String },

    #[error("Line of inquiry {line_id} targets unknown suspect {suspect_id}")]
    InquiryUnknownSuspect {
        line_id: LineOfInquiryId,
        suspect_id: SuspectId,
    },
}

impl CaseContent {
    /// Check cross-references in the content and report every problem found.
    pub fn validate(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        let object_ids: HashSet<&ObjectId> = self.objects.iter().map(|o| &o.id).collect();
        let suspect_ids: HashSet<&SuspectId> = self.suspects.iter().map(|s| &s.id).collect();

        for stack in &self.stacks {
            if !object_ids.contains(&stack.anchor_id) {
                issues.push(ContentIssue::StackAnchorMissing {
                    anchor_id: stack.anchor_id.clone(),
                });
            }
            for linked_id in &stack.linked_ids {
                if !object_ids.contains(linked_id) {
                    issues.push(ContentIssue::StackLinkedMissing {
                        anchor_id: stack.anchor_id.clone(),
                        linked_id: linked_id.clone(),
                    });
                }
            }
            if stack.total_slots < stack.required_slots() {
                issues.push(ContentIssue::StackTooSmall {
                    anchor_id: stack.anchor_id.clone(),
                    total_slots: stack.total_slots,
                    required: stack.required_slots(),
                });
            }
        }

        let canon = &self.canonical_timeline;
        if !suspect_ids.contains(&canon.culprit_id) {
            issues.push(ContentIssue::UnknownCulprit {
                culprit_id: canon.culprit_id.clone(),
            });
        }
        for object_id in canon.key_object_ids() {
            if !object_ids.contains(object_id) {
                issues.push(ContentIssue::KeyEventUnknownObject {
                    object_id: object_id.clone(),
                });
            }
        }

        for clue in &self.case_file.clues {
            if self.case_file.anchor(clue.category).is_none() {
                issues.push(ContentIssue::ClueWithoutAnchor {
                    clue_id: clue.id.clone(),
                    category: clue.category,
                });
                continue;
            }
            let has_slot = self
                .case_file
                .slots()
                .any(|s| s.correct_event_key.as_deref() == Some(clue.event_key.as_str()));
            if clue.kind == ClueKind::Primary && !has_slot {
                issues.push(ContentIssue::PrimaryClueWithoutSlot {
                    clue_id: clue.id.clone(),
                    event_key: clue.event_key.clone(),
                });
            }
        }

        for line in &self.lines_of_inquiry {
            if !suspect_ids.contains(&line.suspect_id) {
                issues.push(ContentIssue::InquiryUnknownSuspect {
                    line_id: line.id.clone(),
                    suspect_id: line.suspect_id.clone(),
                });
            }
        }

        for issue in &issues {
            tracing::warn!(%issue, "Case content issue");
        }

        issues
    }
}
