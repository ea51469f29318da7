//! Card image tracking - which cards have a resolved image.

use case_rules::ObjectId;
use std::collections::HashMap;

use crate::collaborators::{ImageService, ImageStatus};

/// Latest known image status per card.
#[derive(Debug, Clone, Default)]
pub struct CardImages {
    statuses: HashMap<ObjectId, ImageStatus>,
}

impl CardImages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a card's image and record the answer.
    pub async fn fetch(&mut self, service: &dyn ImageService, card_id: &ObjectId) -> &ImageStatus {
        self.statuses.insert(card_id.clone(), ImageStatus::Pending);
        let status = service.get_image(card_id).await;
        if let ImageStatus::Failed(reason) = &status {
            tracing::warn!(card_id = %card_id, %reason, "Card image failed");
        }
        let slot = self
            .statuses
            .entry(card_id.clone())
            .or_insert(ImageStatus::Pending);
        *slot = status;
        slot
    }

    pub fn record(&mut self, card_id: ObjectId, status: ImageStatus) {
        self.statuses.insert(card_id, status);
    }

    pub fn status(&self, card_id: &ObjectId) -> Option<&ImageStatus> {
        self.statuses.get(card_id)
    }

    /// The card has a ready image.
    pub fn is_resolved(&self, card_id: &ObjectId) -> bool {
        matches!(self.statuses.get(card_id), Some(ImageStatus::Ready(_)))
    }

    pub fn clear(&mut self) {
        self.statuses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{ImageHandle, MockImageService};

    #[tokio::test]
    async fn test_fetch_records_status() {
        let mut service = MockImageService::new();
        service.expect_get_image().returning(|id| {
            if id.as_str() == "knife" {
                ImageStatus::Ready(ImageHandle("cache/knife.png".to_string()))
            } else {
                ImageStatus::Failed("no prompt".to_string())
            }
        });

        let mut images = CardImages::new();
        let knife = ObjectId::new("knife");
        let vase = ObjectId::new("vase");

        images.fetch(&service, &knife).await;
        images.fetch(&service, &vase).await;

        assert!(images.is_resolved(&knife));
        assert!(!images.is_resolved(&vase));
        assert!(matches!(images.status(&vase), Some(ImageStatus::Failed(_))));
        assert!(images.status(&ObjectId::new("other")).is_none());
    }

    #[test]
    fn test_pending_is_not_resolved() {
        let mut images = CardImages::new();
        images.record(ObjectId::new("map"), ImageStatus::Pending);
        assert!(!images.is_resolved(&ObjectId::new("map")));

        images.record(
            ObjectId::new("map"),
            ImageStatus::Ready(ImageHandle("cache/map.png".to_string())),
        );
        assert!(images.is_resolved(&ObjectId::new("map")));

        images.clear();
        assert!(images.status(&ObjectId::new("map")).is_none());
    }
}
