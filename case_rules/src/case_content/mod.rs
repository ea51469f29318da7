//! Case content - the authored data a story loads: objects, suspects, stacks,
//! ground truth, lines of inquiry and the case-file layout.

mod canon;
mod case_file;
mod inquiry;
mod stack;
mod validation;

pub use canon::*;
pub use case_file::*;
pub use inquiry::*;
pub use stack::*;
pub use validation::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::entities::{LineOfInquiryId, ObjectId, StoryObject, Suspect, SuspectId};
use crate::error::ContentError;

/// Everything authored for one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CaseContent {
    #[serde(default)]
    pub title: String,

    /// The object catalog.
    #[serde(default)]
    pub objects: Vec<StoryObject>,

    #[serde(default)]
    pub suspects: Vec<Suspect>,

    #[serde(default)]
    pub stacks: Vec<StackDefinition>,

    #[serde(default)]
    pub canonical_timeline: CanonicalTimeline,

    #[serde(default)]
    pub lines_of_inquiry: Vec<LineOfInquiry>,

    #[serde(default)]
    pub case_file: CaseFileLayout,
}

impl CaseContent {
    /// Create empty content with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parse content from TOML.
    ///
    /// Duplicate identifiers are rejected; softer problems are reported by
    /// [`CaseContent::validate`].
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        let content: CaseContent = toml::from_str(source)?;
        content.check_unique_ids()?;
        tracing::debug!(
            title = %content.title,
            objects = content.objects.len(),
            stacks = content.stacks.len(),
            "Loaded case content"
        );
        Ok(content)
    }

    pub fn with_object(mut self, object: StoryObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn with_suspect(mut self, suspect: Suspect) -> Self {
        self.suspects.push(suspect);
        self
    }

    pub fn with_stack(mut self, stack: StackDefinition) -> Self {
        self.stacks.push(stack);
        self
    }

    pub fn with_canonical_timeline(mut self, canon: CanonicalTimeline) -> Self {
        self.canonical_timeline = canon;
        self
    }

    pub fn with_line_of_inquiry(mut self, line: LineOfInquiry) -> Self {
        self.lines_of_inquiry.push(line);
        self
    }

    pub fn with_case_file(mut self, layout: CaseFileLayout) -> Self {
        self.case_file = layout;
        self
    }

    pub fn object(&self, id: &ObjectId) -> Option<&StoryObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    pub fn suspect(&self, id: &SuspectId) -> Option<&Suspect> {
        self.suspects.iter().find(|s| &s.id == id)
    }

    pub fn line_of_inquiry(&self, id: &LineOfInquiryId) -> Option<&LineOfInquiry> {
        self.lines_of_inquiry.iter().find(|l| &l.id == id)
    }

    fn check_unique_ids(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for object in &self.objects {
            if !seen.insert(&object.id) {
                return Err(ContentError::DuplicateObject(object.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for suspect in &self.suspects {
            if !seen.insert(&suspect.id) {
                return Err(ContentError::DuplicateSuspect(suspect.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for slot in self.case_file.slots() {
            if !seen.insert(&slot.slot_id) {
                return Err(ContentError::DuplicateSlot(slot.slot_id.clone()));
            }
        }

        Ok(())
    }
}
