use serde::{Deserialize, Serialize};

/// Internal page identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    #[default]
    Home,
    Auth,
    AdminDashboard,
    UserAccount,
    ReviewForm,
    HotelReviews,
}

impl PageId {
    pub const ALL: [PageId; 6] = [
        PageId::Home,
        PageId::Auth,
        PageId::AdminDashboard,
        PageId::UserAccount,
        PageId::ReviewForm,
        PageId::HotelReviews,
    ];

    /// Pages that only make sense with a selected venue
    pub fn requires_venue(self) -> bool {
        matches!(self, PageId::ReviewForm | PageId::HotelReviews)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Auth => "auth",
            PageId::AdminDashboard => "admin-dashboard",
            PageId::UserAccount => "user-account",
            PageId::ReviewForm => "review-form",
            PageId::HotelReviews => "hotel-reviews",
        }
    }
}

/// What is on screen: a page plus the venue it concerns.
///
/// Also the payload stored with every history entry, so back/forward can
/// rebuild it without re-decoding the address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NavigationState {
    pub page: PageId,
    #[serde(rename = "hotelId", default)]
    pub selected_venue_id: Option<String>,
}

impl NavigationState {
    pub fn new(page: PageId, selected_venue_id: Option<String>) -> Self {
        Self {
            page,
            selected_venue_id,
        }
    }

    pub fn page(page: PageId) -> Self {
        Self::new(page, None)
    }

    pub fn home() -> Self {
        Self::default()
    }

    pub fn with_venue(page: PageId, venue_id: impl Into<String>) -> Self {
        Self::new(page, Some(venue_id.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_payload_uses_page_and_hotel_id_keys() {
        let state = NavigationState::with_venue(PageId::HotelReviews, "42");
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"page":"hotel-reviews","hotelId":"42"}"#);

        let back: NavigationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn only_venue_pages_require_a_venue() {
        let needing: Vec<_> = PageId::ALL.iter().filter(|p| p.requires_venue()).collect();
        assert_eq!(needing, vec![&PageId::ReviewForm, &PageId::HotelReviews]);
    }
}
