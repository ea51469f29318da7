//! Narrative time - the chronological key evidence is ordered by.

use serde::{Deserialize, Serialize};

/// A point in the story's chronology.
///
/// Ordering compares day, then hour, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct StoryTime {
    pub day: u32,
    pub hour: u8,
    pub minute: u8,
}

impl StoryTime {
    /// Create a new story time.
    pub fn new(day: u32, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    /// Build a story time from minutes elapsed since day 0, 00:00.
    pub fn from_minutes(total: u64) -> Self {
        let minute = (total % 60) as u8;
        let hours = total / 60;
        let hour = (hours % 24) as u8;
        let day = (hours / 24) as u32;
        Self { day, hour, minute }
    }

    /// Minutes elapsed since day 0, 00:00.
    pub fn as_minutes(&self) -> u64 {
        (self.day as u64 * 24 + self.hour as u64) * 60 + self.minute as u64
    }
}

impl std::fmt::Display for StoryTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Day {}, {:02}:{:02}", self.day, self.hour, self.minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let evening = StoryTime::new(1, 21, 30);
        let midnight = StoryTime::new(2, 0, 5);
        let noon = StoryTime::new(1, 12, 0);

        assert!(noon < evening);
        assert!(evening < midnight);
    }

    #[test]
    fn test_minutes_conversion() {
        let time = StoryTime::new(2, 3, 15);
        assert_eq!(StoryTime::from_minutes(time.as_minutes()), time);
        assert_eq!(StoryTime::from_minutes(61), StoryTime::new(0, 1, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(StoryTime::new(3, 7, 5).to_string(), "Day 3, 07:05");
    }
}
