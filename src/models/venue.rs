use serde::{Deserialize, Serialize};

/// A reviewable hotel/restaurant as served by `GET /api/hotels`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Venue {
    /// Case-insensitive substring match on name, location or description.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Admin editor payload for `POST /api/hotels` and `PUT /api/hotels/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VenueForm {
    pub name: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
}

impl From<&Venue> for VenueForm {
    fn from(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            location: venue.location.clone(),
            description: venue.description.clone().unwrap_or_default(),
            image_url: venue.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Body of a successful venue create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VenueMutationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub hotel: Option<Venue>,
}
