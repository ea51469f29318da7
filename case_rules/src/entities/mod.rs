//! Entity definitions for a case: evidence objects, suspects and their identifiers.

mod story_object;
mod suspect;

pub use story_object::*;
pub use suspect::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authored identifiers are plain strings so content files can reference them.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a story object (a card that can become evidence).
    ObjectId
);
define_id!(
    /// Identifier of a suspect or other interviewable character.
    SuspectId
);
define_id!(
    /// Identifier of an explorable location.
    LocationId
);
define_id!(
    /// Identifier of a clue in the case-file puzzle.
    ClueId
);
define_id!(
    /// Identifier of a slot in the case-file puzzle.
    SlotId
);
define_id!(LineOfInquiryId);

impl ObjectId {
    /// The derived id of the timeline entry for this object (`ev-<objectId>`).
    pub fn evidence_entry_id(&self) -> String {
        format!("ev-{}", self.0)
    }
}
