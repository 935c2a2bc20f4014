use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// The `hotel` field of a review: a bare id, or populated by the analytics endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewHotel {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id", default)]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ReviewHotel {
    pub fn id(&self) -> &str {
        match self {
            ReviewHotel::Id(id) => id,
            ReviewHotel::Populated { id, .. } => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ReviewHotel::Id(_) => None,
            ReviewHotel::Populated { name, .. } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub hotel: Option<ReviewHotel>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/reviews`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub hotel: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewSubmission {
    pub fn new(hotel: impl Into<String>, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            hotel: hotel.into(),
            rating,
            comment: comment.into(),
        }
    }

    /// Presence and range checks only
    pub fn validate(&self) -> Result<()> {
        if self.hotel.trim().is_empty() {
            return Err(ClientError::Validation("A hotel must be selected.".into()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ClientError::Validation(format!(
                "Rating must be between {} and {}.",
                MIN_RATING, MAX_RATING
            )));
        }
        if self.comment.trim().is_empty() {
            return Err(ClientError::Validation("Comment cannot be empty.".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReviewSubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub review: Option<Review>,
}
