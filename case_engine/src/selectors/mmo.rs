//! Motive / Means / Opportunity progress per suspect.

use case_rules::{MmoCategory, StoryObject};
use serde::{Deserialize, Serialize};

/// Completion ratios in `[0, 1]` for each category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MmoProgress {
    pub motive: f32,
    pub means: f32,
    pub opportunity: f32,
}

impl MmoProgress {
    pub fn get(&self, category: MmoCategory) -> f32 {
        match category {
            MmoCategory::Motive => self.motive,
            MmoCategory::Means => self.means,
            MmoCategory::Opportunity => self.opportunity,
        }
    }

    fn set(&mut self, category: MmoCategory, value: f32) {
        match category {
            MmoCategory::Motive => self.motive = value,
            MmoCategory::Means => self.means = value,
            MmoCategory::Opportunity => self.opportunity = value,
        }
    }

    /// All three categories are full.
    pub fn is_complete(&self) -> bool {
        MmoCategory::ALL.iter().all(|c| self.get(*c) >= 1.0)
    }
}

/// Estimate how far the evidence against a suspect covers each category.
///
/// The denominator is a rough heuristic: tagged objects in the whole catalog
/// divided evenly across the three categories (at least 1). Small catalogs
/// can therefore reach 1.0 with a single matching object; results are
/// clamped to 1.0.
pub fn compute_mmo_progress<'a, E, C>(evidence_for_suspect: E, all_objects: C) -> MmoProgress
where
    E: IntoIterator<Item = &'a StoryObject>,
    C: IntoIterator<Item = &'a StoryObject>,
{
    let total_tagged = all_objects.into_iter().filter(|o| o.is_tagged()).count();
    let max_per_category = (total_tagged / 3).max(1) as f32;

    let mut counts = [0usize; 3];
    for object in evidence_for_suspect {
        for (i, category) in MmoCategory::ALL.iter().enumerate() {
            if object.has_tag(*category) {
                counts[i] += 1;
            }
        }
    }

    let mut progress = MmoProgress::default();
    for (i, category) in MmoCategory::ALL.iter().enumerate() {
        progress.set(*category, (counts[i] as f32 / max_per_category).min(1.0));
    }
    progress
}
