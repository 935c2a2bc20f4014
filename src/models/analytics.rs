use serde::{Deserialize, Deserializer, Serialize};

/// `GET /api/analytics/overall`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverallAnalytics {
    #[serde(default)]
    pub total_hotels: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_reviews: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub average_rating: f64,
}

/// One row of `GET /api/analytics/reviews-per-hotel`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueReviewStats {
    pub hotel_id: String,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub average_rating: f64,
}

/// The backend formats averages with `toFixed`, so they may arrive as strings
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Raw::Null => Ok(0.0),
    }
}
