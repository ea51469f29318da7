//! Evidence stacking - groups evidence into anchor+linked stacks and singles.

use case_rules::{ObjectId, StackDefinition, StoryObject, StoryTime};
use std::collections::HashSet;

/// An anchor with the linked objects discovered so far.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceStack<'a> {
    pub anchor: &'a StoryObject,
    /// Present linked objects, in definition order.
    pub linked: Vec<&'a StoryObject>,
    pub total_slots: usize,
    /// Linked ids from the definition not present in this stack.
    pub undiscovered: usize,
}

impl EvidenceStack<'_> {
    /// Slots still waiting for an undiscovered linked object.
    ///
    /// Counts undiscovered linked ids, bounded by the slots the definition
    /// leaves free after the anchor and discovered links.
    pub fn empty_slots(&self) -> usize {
        let free = self.total_slots.saturating_sub(1 + self.linked.len());
        self.undiscovered.min(free)
    }
}

/// A node in the derived timeline view.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineNode<'a> {
    Single(&'a StoryObject),
    Stack(EvidenceStack<'a>),
}

impl TimelineNode<'_> {
    /// The timestamp the node is ordered by (the anchor's, for stacks).
    pub fn timestamp(&self) -> StoryTime {
        match self {
            TimelineNode::Single(object) => object.timestamp,
            TimelineNode::Stack(stack) => stack.anchor.timestamp,
        }
    }

    /// The single object, or the stack's anchor.
    pub fn representative(&self) -> &StoryObject {
        match self {
            TimelineNode::Single(object) => object,
            TimelineNode::Stack(stack) => stack.anchor,
        }
    }

    /// Ids of every object in the node.
    pub fn object_ids(&self) -> Vec<&ObjectId> {
        match self {
            TimelineNode::Single(object) => vec![&object.id],
            TimelineNode::Stack(stack) => std::iter::once(&stack.anchor.id)
                .chain(stack.linked.iter().map(|o| &o.id))
                .collect(),
        }
    }
}

/// Partition evidence into stacks and singles, ordered by timestamp.
///
/// # Algorithm
///
/// 1. Without stack definitions every item is a single
/// 2. For each definition whose anchor is present, collect present linked
///    objects; with at least one, emit a stack and consume its members
/// 3. Unconsumed evidence becomes singles
/// 4. Stable sort by representative timestamp
///
/// An object already consumed by an earlier definition is not reused.
/// Definitions referencing ids absent from the evidence are skipped.
pub fn derive_timeline_nodes<'a>(
    evidence: &[&'a StoryObject],
    stacks: &[StackDefinition],
) -> Vec<TimelineNode<'a>> {
    let mut nodes: Vec<TimelineNode<'a>> = Vec::with_capacity(evidence.len());

    if stacks.is_empty() {
        nodes.extend(evidence.iter().map(|o| TimelineNode::Single(*o)));
        nodes.sort_by_key(|n| n.timestamp());
        return nodes;
    }

    let find = |id: &ObjectId| evidence.iter().copied().find(|o| &o.id == id);
    let mut consumed: HashSet<&ObjectId> = HashSet::new();

    for definition in stacks {
        if consumed.contains(&definition.anchor_id) {
            tracing::debug!(anchor_id = %definition.anchor_id, "Stack skipped: anchor already stacked");
            continue;
        }
        let Some(anchor) = find(&definition.anchor_id) else {
            continue;
        };

        let linked: Vec<&'a StoryObject> = definition
            .linked_ids
            .iter()
            .filter(|id| **id != anchor.id && !consumed.contains(id))
            .filter_map(|id| find(id))
            .collect();

        if linked.is_empty() {
            continue;
        }

        let undiscovered = definition
            .linked_ids
            .iter()
            .filter(|id| **id != anchor.id && !linked.iter().any(|o| &o.id == *id))
            .count();

        consumed.insert(&anchor.id);
        consumed.extend(linked.iter().copied().map(|o| &o.id));

        nodes.push(TimelineNode::Stack(EvidenceStack {
            anchor,
            linked,
            total_slots: definition.total_slots,
            undiscovered,
        }));
    }

    nodes.extend(
        evidence
            .iter()
            .filter(|o| !consumed.contains(&o.id))
            .map(|o| TimelineNode::Single(*o)),
    );

    nodes.sort_by_key(|n| n.timestamp());
    nodes
}
