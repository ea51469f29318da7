//! Evidence store - the normalized object catalog, unlock state and timeline.
//!
//! Each object moves between three effective states:
//! - **Locked**: never paid for, not on the timeline
//! - **Active**: on the timeline (`is_evidence`); the unlock is paid on first entry
//! - **Unlocked-but-removed**: paid for, currently off the timeline
//!
//! State changes only through [`EvidenceState::apply`] (or [`reduce`]).
//! Refused actions return [`EvidenceOutcome::Rejected`] and leave state untouched.

mod action;
mod timeline;

pub use action::*;
pub use timeline::*;

use case_rules::{CaseContent, EngineConfig, ObjectId, StoryObject, SuspectId, TokenLedger};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::events::CaseEvent;

/// The session's evidence state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceState {
    /// All known objects by ID.
    objects: HashMap<ObjectId, StoryObject>,

    /// Catalog order, for deterministic iteration.
    catalog_order: Vec<ObjectId>,

    /// Entries for objects currently placed as evidence, in placement order.
    timeline: Vec<TimelineEntry>,

    ledger: TokenLedger,

    milestone_threshold: usize,

    /// Milestone counts already announced this session.
    announced_milestones: BTreeSet<usize>,

    /// Next value for `TimelineEntry::timestamp_collected`.
    next_sequence: u64,
}

/// Apply an action to an owned state, returning the new state.
pub fn reduce(mut state: EvidenceState, action: EvidenceAction) -> (EvidenceState, ActionResult) {
    let result = state.apply(action);
    (state, result)
}

impl EvidenceState {
    /// Build the opening state from authored content.
    ///
    /// Seeded objects start on the timeline at no cost.
    pub fn new(content: &CaseContent, config: &EngineConfig) -> Self {
        let mut state = Self {
            objects: HashMap::new(),
            catalog_order: Vec::new(),
            timeline: Vec::new(),
            ledger: TokenLedger::new(config.starting_tokens),
            milestone_threshold: config.milestone_threshold,
            announced_milestones: BTreeSet::new(),
            next_sequence: 0,
        };

        for object in &content.objects {
            state.insert_object(object.clone());
        }

        state
    }

    // =========================================================================
    // Reducer
    // =========================================================================

    /// Apply one action.
    pub fn apply(&mut self, action: EvidenceAction) -> ActionResult {
        match action {
            EvidenceAction::AddToTimeline(id) => self.add_to_timeline(id),
            EvidenceAction::RemoveFromTimeline(id) => self.remove_from_timeline(id).into(),
            EvidenceAction::AssignToSuspect {
                object_id,
                suspect_id,
            } => self.assign_to_suspect(object_id, suspect_id).into(),
            EvidenceAction::RegisterObject(object) => self.register_object(object).into(),
            EvidenceAction::GrantTokens(amount) => {
                self.ledger.credit(amount);
                EvidenceOutcome::TokensGranted {
                    amount,
                    balance: self.ledger.balance(),
                }
                .into()
            }
        }
    }

    fn add_to_timeline(&mut self, id: ObjectId) -> ActionResult {
        let balance = self.ledger.balance();
        let Some(object) = self.objects.get_mut(&id) else {
            tracing::debug!(object_id = %id, "Add skipped: unknown object");
            return EvidenceOutcome::Rejected(Rejection::UnknownObject(id)).into();
        };

        if object.is_evidence {
            return EvidenceOutcome::AlreadyActive { object_id: id }.into();
        }

        let outcome = if object.has_been_unlocked {
            object.is_evidence = true;
            tracing::debug!(object_id = %id, "Evidence restored to timeline");
            EvidenceOutcome::Restored {
                object_id: id.clone(),
            }
        } else {
            let cost = object.cost_to_unlock;
            if balance < cost {
                tracing::debug!(object_id = %id, cost, balance, "Unlock rejected: insufficient tokens");
                return EvidenceOutcome::Rejected(Rejection::InsufficientFunds {
                    object_id: id,
                    cost,
                    balance,
                })
                .into();
            }
            object.has_been_unlocked = true;
            object.is_evidence = true;
            self.ledger.debit(cost);
            tracing::info!(object_id = %id, cost, balance = self.ledger.balance(), "Evidence unlocked");
            EvidenceOutcome::Unlocked {
                object_id: id.clone(),
                cost,
            }
        };

        self.push_entry(&id);

        let mut result = ActionResult::new(outcome);
        if let Some(event) = self.check_milestone() {
            result = result.with_event(event);
        }
        result
    }

    fn remove_from_timeline(&mut self, id: ObjectId) -> EvidenceOutcome {
        let Some(object) = self.objects.get_mut(&id) else {
            return EvidenceOutcome::Rejected(Rejection::UnknownObject(id));
        };

        if !object.is_evidence {
            return EvidenceOutcome::NotActive { object_id: id };
        }

        object.is_evidence = false;
        object.assigned_to_suspect_ids.clear();
        self.timeline.retain(|entry| entry.card_id != id);
        tracing::debug!(object_id = %id, "Evidence removed from timeline");

        EvidenceOutcome::Removed { object_id: id }
    }

    fn assign_to_suspect(&mut self, object_id: ObjectId, suspect_id: SuspectId) -> EvidenceOutcome {
        let Some(object) = self.objects.get_mut(&object_id) else {
            return EvidenceOutcome::Rejected(Rejection::UnknownObject(object_id));
        };

        let assigned = if object.assigned_to_suspect_ids.remove(&suspect_id) {
            false
        } else {
            object.assigned_to_suspect_ids.insert(suspect_id.clone());
            true
        };

        EvidenceOutcome::AssignmentToggled {
            object_id,
            suspect_id,
            assigned,
        }
    }

    fn register_object(&mut self, object: StoryObject) -> EvidenceOutcome {
        if self.objects.contains_key(&object.id) {
            return EvidenceOutcome::Rejected(Rejection::DuplicateObject(object.id));
        }
        let object_id = object.id.clone();
        self.insert_object(object);
        tracing::debug!(object_id = %object_id, "Object registered");
        EvidenceOutcome::Registered { object_id }
    }

    fn insert_object(&mut self, mut object: StoryObject) {
        if object.seeded {
            object.is_evidence = true;
        }
        if object.is_evidence {
            object.has_been_unlocked = true;
        }

        let id = object.id.clone();
        let active = object.is_evidence;
        self.catalog_order.push(id.clone());
        self.objects.insert(id.clone(), object);

        if active {
            self.push_entry(&id);
        }
    }

    /// Append a timeline entry unless one already exists for this card.
    fn push_entry(&mut self, id: &ObjectId) {
        if self.timeline.iter().any(|entry| &entry.card_id == id) {
            return;
        }
        if let Some(object) = self.objects.get(id) {
            self.timeline
                .push(TimelineEntry::for_object(object, self.next_sequence));
            self.next_sequence += 1;
        }
    }

    fn check_milestone(&mut self) -> Option<CaseEvent> {
        let count = self.player_added_count();
        if count == 0 || self.milestone_threshold == 0 || count % self.milestone_threshold != 0 {
            return None;
        }
        if !self.announced_milestones.insert(count) {
            return None;
        }
        tracing::info!(evidence_count = count, "Evidence milestone reached");
        Some(CaseEvent::MilestoneReached {
            evidence_count: count,
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn balance(&self) -> u32 {
        self.ledger.balance()
    }

    pub fn ledger(&self) -> &TokenLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut TokenLedger {
        &mut self.ledger
    }

    /// Check whether adding the object now would succeed or be free.
    pub fn can_afford(&self, id: &ObjectId) -> bool {
        self.objects
            .get(id)
            .map(|o| o.has_been_unlocked || self.ledger.can_afford(o.cost_to_unlock))
            .unwrap_or(false)
    }

    pub fn object(&self, id: &ObjectId) -> Option<&StoryObject> {
        self.objects.get(id)
    }

    /// All known objects in catalog order.
    pub fn objects(&self) -> impl Iterator<Item = &StoryObject> {
        self.catalog_order.iter().filter_map(|id| self.objects.get(id))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// Objects currently on the timeline, in placement order.
    pub fn evidence(&self) -> Vec<&StoryObject> {
        self.timeline
            .iter()
            .filter_map(|entry| self.objects.get(&entry.card_id))
            .collect()
    }

    /// Evidence the player has attached to a suspect.
    pub fn evidence_for_suspect(&self, suspect_id: &SuspectId) -> Vec<&StoryObject> {
        self.evidence()
            .into_iter()
            .filter(|o| o.is_assigned_to(suspect_id))
            .collect()
    }

    /// Evidence added by the player, excluding seeded objects.
    pub fn player_added_count(&self) -> usize {
        self.evidence().iter().filter(|o| !o.seeded).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::MmoCategory;

    fn config(starting_tokens: u32, milestone_threshold: usize) -> EngineConfig {
        EngineConfig {
            starting_tokens,
            milestone_threshold,
            ..EngineConfig::default()
        }
    }

    fn content() -> CaseContent {
        CaseContent::new("Test case")
            .with_object(StoryObject::new("body", "The body").seeded())
            .with_object(StoryObject::new("knife", "Knife").with_cost(10))
            .with_object(StoryObject::new("letter", "Letter").with_cost(6))
            .with_object(StoryObject::new("button", "Button"))
    }

    fn add(state: &mut EvidenceState, id: &str) -> ActionResult {
        state.apply(EvidenceAction::AddToTimeline(ObjectId::new(id)))
    }

    fn remove(state: &mut EvidenceState, id: &str) -> ActionResult {
        state.apply(EvidenceAction::RemoveFromTimeline(ObjectId::new(id)))
    }

    #[test]
    fn test_seeded_objects_start_on_timeline() {
        let state = EvidenceState::new(&content(), &config(20, 5));

        assert_eq!(state.timeline().len(), 1);
        assert_eq!(state.timeline()[0].id, "ev-body");
        let body = state.object(&ObjectId::new("body")).unwrap();
        assert!(body.is_evidence);
        assert!(body.has_been_unlocked);
        assert_eq!(state.player_added_count(), 0);
        assert_eq!(state.balance(), 20);
    }

    #[test]
    fn test_unlock_charged_exactly_once() {
        let mut state = EvidenceState::new(&content(), &config(20, 5));

        let first = add(&mut state, "knife");
        assert_eq!(
            first.outcome,
            EvidenceOutcome::Unlocked {
                object_id: ObjectId::new("knife"),
                cost: 10
            }
        );
        assert_eq!(state.balance(), 10);

        remove(&mut state, "knife");
        assert_eq!(state.balance(), 10, "removal does not refund");

        let again = add(&mut state, "knife");
        assert_eq!(
            again.outcome,
            EvidenceOutcome::Restored {
                object_id: ObjectId::new("knife")
            }
        );
        assert_eq!(state.balance(), 20 - 10);
    }

    #[test]
    fn test_insufficient_funds_is_silent_rejection() {
        let mut state = EvidenceState::new(&content(), &config(5, 5));

        let result = add(&mut state, "letter");
        assert_eq!(
            result.outcome,
            EvidenceOutcome::Rejected(Rejection::InsufficientFunds {
                object_id: ObjectId::new("letter"),
                cost: 6,
                balance: 5,
            })
        );
        assert_eq!(state.balance(), 5);
        let letter = state.object(&ObjectId::new("letter")).unwrap();
        assert!(!letter.has_been_unlocked);
        assert!(!letter.is_evidence);
        assert_eq!(state.timeline().len(), 1);
        assert!(!state.can_afford(&ObjectId::new("letter")));
    }

    #[test]
    fn test_exact_balance_unlock_leaves_zero() {
        let content = CaseContent::new("Boundary")
            .with_object(StoryObject::new("ring", "Ring").with_cost(5));
        let mut state = EvidenceState::new(&content, &config(5, 5));

        assert!(state.can_afford(&ObjectId::new("ring")));
        let result = add(&mut state, "ring");
        assert!(!result.outcome.is_rejected());
        assert_eq!(state.balance(), 0);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut state = EvidenceState::new(&content(), &config(20, 5));

        add(&mut state, "knife");
        let second = add(&mut state, "knife");

        assert_eq!(
            second.outcome,
            EvidenceOutcome::AlreadyActive {
                object_id: ObjectId::new("knife")
            }
        );
        assert_eq!(state.balance(), 10);
        let entries = state
            .timeline()
            .iter()
            .filter(|e| e.card_id == ObjectId::new("knife"))
            .count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_remove_clears_assignments_and_entry() {
        let mut state = EvidenceState::new(&content(), &config(20, 5));
        add(&mut state, "knife");
        state.apply(EvidenceAction::AssignToSuspect {
            object_id: ObjectId::new("knife"),
            suspect_id: SuspectId::new("cook"),
        });

        let result = remove(&mut state, "knife");
        assert_eq!(
            result.outcome,
            EvidenceOutcome::Removed {
                object_id: ObjectId::new("knife")
            }
        );

        let knife = state.object(&ObjectId::new("knife")).unwrap();
        assert!(knife.assigned_to_suspect_ids.is_empty());
        assert!(!knife.is_evidence);
        assert!(knife.has_been_unlocked);
        assert!(state.timeline().iter().all(|e| e.card_id != knife.id));
    }

    #[test]
    fn test_remove_inactive_is_noop() {
        let mut state = EvidenceState::new(&content(), &config(20, 5));
        let result = remove(&mut state, "knife");
        assert_eq!(
            result.outcome,
            EvidenceOutcome::NotActive {
                object_id: ObjectId::new("knife")
            }
        );
        assert_eq!(state.timeline().len(), 1);
    }

    #[test]
    fn test_assignment_toggles() {
        let mut state = EvidenceState::new(&content(), &config(20, 5));
        add(&mut state, "button");

        let action = EvidenceAction::AssignToSuspect {
            object_id: ObjectId::new("button"),
            suspect_id: SuspectId::new("maid"),
        };

        let first = state.apply(action.clone());
        assert!(matches!(
            first.outcome,
            EvidenceOutcome::AssignmentToggled { assigned: true, .. }
        ));
        assert_eq!(state.evidence_for_suspect(&SuspectId::new("maid")).len(), 1);

        let second = state.apply(action);
        assert!(matches!(
            second.outcome,
            EvidenceOutcome::AssignmentToggled { assigned: false, .. }
        ));
        assert!(state.evidence_for_suspect(&SuspectId::new("maid")).is_empty());
    }

    #[test]
    fn test_unknown_object_rejected() {
        let mut state = EvidenceState::new(&content(), &config(20, 5));
        let result = add(&mut state, "ghost");
        assert_eq!(
            result.outcome,
            EvidenceOutcome::Rejected(Rejection::UnknownObject(ObjectId::new("ghost")))
        );
    }

    #[test]
    fn test_milestone_excludes_seeded_and_fires_once() {
        let content = CaseContent::new("Milestones")
            .with_object(StoryObject::new("seed", "Seed").seeded())
            .with_object(StoryObject::new("a", "A"))
            .with_object(StoryObject::new("b", "B"))
            .with_object(StoryObject::new("c", "C"));
        let mut state = EvidenceState::new(&content, &config(0, 2));

        assert!(add(&mut state, "a").events.is_empty());

        let second = add(&mut state, "b");
        assert_eq!(
            second.events,
            vec![CaseEvent::MilestoneReached { evidence_count: 2 }]
        );

        remove(&mut state, "b");
        let readded = add(&mut state, "b");
        assert!(readded.events.is_empty(), "milestone is one-shot");

        assert!(add(&mut state, "c").events.is_empty());
    }

    #[test]
    fn test_register_dynamic_object() {
        let mut state = EvidenceState::new(&content(), &config(20, 5));
        let testimony = StoryObject::new("testimony-1", "Testimony").with_tag(MmoCategory::Opportunity);

        let result = state.apply(EvidenceAction::RegisterObject(testimony.clone()));
        assert_eq!(
            result.outcome,
            EvidenceOutcome::Registered {
                object_id: ObjectId::new("testimony-1")
            }
        );
        assert_eq!(state.object_count(), 5);
        assert_eq!(state.objects().last().map(|o| o.id.as_str()), Some("testimony-1"));

        let duplicate = state.apply(EvidenceAction::RegisterObject(testimony));
        assert!(duplicate.outcome.is_rejected());
        assert_eq!(state.object_count(), 5);
    }

    #[test]
    fn test_grant_tokens_and_reduce() {
        let state = EvidenceState::new(&content(), &config(3, 5));
        let (state, result) = reduce(state, EvidenceAction::GrantTokens(7));

        assert_eq!(
            result.outcome,
            EvidenceOutcome::TokensGranted {
                amount: 7,
                balance: 10
            }
        );
        let (state, result) = reduce(state, EvidenceAction::AddToTimeline(ObjectId::new("knife")));
        assert!(!result.outcome.is_rejected());
        assert_eq!(state.balance(), 0);
    }

    #[test]
    fn test_timeline_entries_follow_placement_order() {
        let mut state = EvidenceState::new(&content(), &config(50, 5));
        add(&mut state, "letter");
        add(&mut state, "knife");

        let cards: Vec<_> = state.timeline().iter().map(|e| e.card_id.as_str()).collect();
        assert_eq!(cards, vec!["body", "letter", "knife"]);

        let sequences: Vec<_> = state.timeline().iter().map(|e| e.timestamp_collected).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }
}
