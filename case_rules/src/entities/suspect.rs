//! Suspect definitions.

use serde::{Deserialize, Serialize};

use super::SuspectId;

/// A character the player can interview and accuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
    pub id: SuspectId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,

    /// Used to derive the suspect's mugshot card.
    #[serde(default)]
    pub physical_description: String,

    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub backstory: Option<String>,
}

impl Suspect {
    /// Create a new suspect with the given id and name.
    pub fn new(id: impl Into<SuspectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: None,
            physical_description: String::new(),
            personality_traits: Vec::new(),
            backstory: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_physical_description(mut self, description: impl Into<String>) -> Self {
        self.physical_description = description.into();
        self
    }

    /// Name with title, as given to the summarizer and evaluator.
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{}, {}", self.name, title),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_suspect() {
        let suspect = Suspect::new("cook", "Mrs. Hale");
        assert_eq!(suspect.name, "Mrs. Hale");
        assert!(suspect.title.is_none());
        assert_eq!(suspect.display_name(), "Mrs. Hale");
    }

    #[test]
    fn test_display_name_with_title() {
        let suspect = Suspect::new("col", "Arthur Mead").with_title("Colonel");
        assert_eq!(suspect.display_name(), "Arthur Mead, Colonel");
    }
}
