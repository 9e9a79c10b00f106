//! Testimonial model and API types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a testimonial record from the database.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub author_name: String,
    pub quote: String,

    /// Star rating, 1 through 5 (also CHECKed by the database)
    pub rating: i16,

    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or updating a testimonial.
#[derive(Debug, Deserialize)]
pub struct TestimonialRequest {
    pub author_name: String,
    pub quote: String,
    pub rating: i16,

    #[serde(default)]
    pub published: bool,
}

impl TestimonialRequest {
    /// Rating must fit the 1..=5 star scale.
    pub fn rating_is_valid(&self) -> bool {
        (1..=5).contains(&self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(rating: i16) -> TestimonialRequest {
        TestimonialRequest {
            author_name: "A. Student".to_string(),
            quote: "Saved my semester.".to_string(),
            rating,
            published: true,
        }
    }

    #[test]
    fn rating_bounds() {
        assert!(request(1).rating_is_valid());
        assert!(request(5).rating_is_valid());
        assert!(!request(0).rating_is_valid());
        assert!(!request(6).rating_is_valid());
        assert!(!request(-1).rating_is_valid());
    }
}
