//! Evidence stack definitions - authored groupings of an anchor object and its related finds.

use serde::{Deserialize, Serialize};

use crate::entities::ObjectId;

/// Groups an anchor object with linked objects on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackDefinition {
    pub anchor_id: ObjectId,
    /// Linked objects in display order.
    pub linked_ids: Vec<ObjectId>,
    /// Slots shown for the stack, including the anchor.
    pub total_slots: usize,
}

impl StackDefinition {
    /// Create a stack sized to exactly fit its anchor and linked objects.
    pub fn new(anchor_id: impl Into<ObjectId>, linked_ids: impl IntoIterator<Item = ObjectId>) -> Self {
        let linked_ids: Vec<ObjectId> = linked_ids.into_iter().collect();
        let total_slots = linked_ids.len() + 1;
        Self {
            anchor_id: anchor_id.into(),
            linked_ids,
            total_slots,
        }
    }

    pub fn with_total_slots(mut self, total_slots: usize) -> Self {
        self.total_slots = total_slots;
        self
    }

    /// Minimum number of slots this definition needs.
    pub fn required_slots(&self) -> usize {
        self.linked_ids.len() + 1
    }

    /// Check whether an object participates in this stack.
    pub fn involves(&self, id: &ObjectId) -> bool {
        &self.anchor_id == id || self.linked_ids.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_sizing() {
        let stack = StackDefinition::new(
            "letter",
            vec![ObjectId::new("envelope"), ObjectId::new("stamp")],
        );
        assert_eq!(stack.total_slots, 3);
        assert_eq!(stack.required_slots(), 3);

        let stack = stack.with_total_slots(5);
        assert_eq!(stack.total_slots, 5);
        assert!(stack.involves(&ObjectId::new("stamp")));
        assert!(stack.involves(&ObjectId::new("letter")));
        assert!(!stack.involves(&ObjectId::new("knife")));
    }
}
