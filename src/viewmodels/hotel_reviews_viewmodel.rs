// ============================================================================
// HOTEL REVIEWS VIEWMODEL - Public reviews of one venue
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ClientError, Result};
use crate::models::Review;
use crate::services::ReviewBackend;

pub const MSG_MISSING_VENUE: &str = "Hotel information missing to fetch reviews.";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HotelReviewsState {
    pub reviews: Vec<Review>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct HotelReviewsViewModel {
    backend: Rc<dyn ReviewBackend>,
    state: Rc<RefCell<HotelReviewsState>>,
}

impl HotelReviewsViewModel {
    pub fn new(backend: Rc<dyn ReviewBackend>) -> Self {
        Self {
            backend,
            state: Rc::new(RefCell::new(HotelReviewsState::default())),
        }
    }

    pub fn state(&self) -> HotelReviewsState {
        self.state.borrow().clone()
    }

    /// Load reviews for the selected venue; `None` means nothing is selected
    pub async fn load(&self, venue_id: Option<&str>) -> Result<usize> {
        let Some(venue_id) = venue_id.filter(|id| !id.is_empty()) else {
            let mut state = self.state.borrow_mut();
            state.reviews.clear();
            state.is_loading = false;
            state.error = Some(MSG_MISSING_VENUE.to_string());
            return Err(ClientError::Validation(MSG_MISSING_VENUE.to_string()));
        };

        {
            let mut state = self.state.borrow_mut();
            state.is_loading = true;
            state.error = None;
        }
        log::info!("[REVIEWS] Fetching reviews for hotel {}", venue_id);

        let result = self.backend.venue_reviews(venue_id).await;

        let mut state = self.state.borrow_mut();
        state.is_loading = false;
        match result {
            Ok(reviews) => {
                log::info!("[REVIEWS] {} reviews loaded", reviews.len());
                state.reviews = reviews;
                Ok(state.reviews.len())
            }
            Err(e) => {
                log::error!("[REVIEWS] Failed to load reviews: {}", e);
                state.reviews.clear();
                state.error = Some(format!("Failed to load reviews: {}", e));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeBackend;
    use futures::executor::block_on;

    fn review(id: &str, rating: u8) -> Review {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "hotel": "h1",
            "userName": "bob",
            "rating": rating,
            "comment": "Nice stay",
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn loads_reviews_for_venue() {
        let backend = Rc::new(FakeBackend::default());
        backend.set_reviews(Ok(vec![review("r1", 5), review("r2", 3)]));
        let vm = HotelReviewsViewModel::new(backend.clone());

        assert_eq!(block_on(vm.load(Some("h1"))).unwrap(), 2);
        let state = vm.state();
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.reviews[0].user_name.as_deref(), Some("bob"));
        assert_eq!(backend.last_call("venue_reviews").unwrap().target.as_deref(), Some("h1"));
    }

    #[test]
    fn missing_venue_skips_request() {
        let backend = Rc::new(FakeBackend::default());
        let vm = HotelReviewsViewModel::new(backend.clone());

        assert!(block_on(vm.load(None)).is_err());
        assert_eq!(vm.state().error.as_deref(), Some(MSG_MISSING_VENUE));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn failure_empties_reviews() {
        let backend = Rc::new(FakeBackend::default());
        backend.set_reviews(Ok(vec![review("r1", 4)]));
        let vm = HotelReviewsViewModel::new(backend.clone());
        block_on(vm.load(Some("h1"))).unwrap();

        backend.set_reviews(Err(ClientError::http(404, "Hotel not found")));
        assert!(block_on(vm.load(Some("h1"))).is_err());

        let state = vm.state();
        assert!(state.reviews.is_empty());
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to load reviews: Hotel not found")
        );
    }
}
