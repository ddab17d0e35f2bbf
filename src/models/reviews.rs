use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

pub const MIN_RATING: f32 = 1.0;
pub const MAX_RATING: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub reservation_id: String,
    pub customer_name: String,
    pub stylist_id: String,
    pub service_id: String,
    pub rating: f32,
    pub content: String,
    /// Encoded images (data URLs), stored as given.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn validate(&self) -> StorageResult<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) || (self.rating * 2.0).fract() != 0.0
        {
            return Err(StorageError::invalid(
                "Rating must be between 1 and 5 in steps of 0.5",
            ));
        }
        if self.content.trim().is_empty() {
            return Err(StorageError::invalid("Please write a review"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: f32, content: &str) -> Review {
        Review {
            id: "v1".to_string(),
            reservation_id: "r1".to_string(),
            customer_name: "Kim".to_string(),
            stylist_id: "stylist1".to_string(),
            service_id: "cut".to_string(),
            rating,
            content: content.to_string(),
            images: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn half_point_ratings_are_accepted() {
        assert!(review(4.5, "great").validate().is_ok());
        assert!(review(1.0, "ok").validate().is_ok());
        assert!(review(5.0, "wow").validate().is_ok());
    }

    #[test]
    fn out_of_range_or_uneven_ratings_are_rejected() {
        assert!(review(0.5, "bad").validate().is_err());
        assert!(review(5.5, "too good").validate().is_err());
        assert!(review(3.3, "odd").validate().is_err());
    }

    #[test]
    fn blank_content_is_rejected() {
        assert!(review(4.0, "   ").validate().is_err());
    }

    #[test]
    fn images_are_omitted_when_empty() {
        let value = serde_json::to_value(review(4.0, "nice")).unwrap();
        assert!(value.get("images").is_none());
        assert_eq!(value["reservationId"], "r1");
    }
}
