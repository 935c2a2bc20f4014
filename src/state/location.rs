// ============================================================================
// LOCATION - Navigation state <-> address bar / history
// ============================================================================

use std::rc::Rc;

use crate::models::{NavigationState, PageId};
use crate::services::HistoryBackend;

const REVIEW_FORM_PREFIX: &str = "/review-form/";
const HOTEL_REVIEWS_PREFIX: &str = "/hotel-reviews/";

/// Path for a navigation state. Venue pages without an id get a bare path.
pub fn encode(state: &NavigationState) -> String {
    let id = state.selected_venue_id.as_deref().filter(|id| !id.is_empty());
    match (state.page, id) {
        (PageId::Home, _) => "/".to_string(),
        (PageId::Auth, _) => "/auth".to_string(),
        (PageId::AdminDashboard, _) => "/admin-dashboard".to_string(),
        (PageId::UserAccount, _) => "/user-account".to_string(),
        (PageId::ReviewForm, Some(id)) => format!("{}{}", REVIEW_FORM_PREFIX, id),
        (PageId::ReviewForm, None) => "/review-form".to_string(),
        (PageId::HotelReviews, Some(id)) => format!("{}{}", HOTEL_REVIEWS_PREFIX, id),
        (PageId::HotelReviews, None) => "/hotel-reviews".to_string(),
    }
}

/// Inverse of [`encode`]. Anything unrecognized is home; never fails.
pub fn decode(path: &str) -> NavigationState {
    for (prefix, page) in [
        (REVIEW_FORM_PREFIX, PageId::ReviewForm),
        (HOTEL_REVIEWS_PREFIX, PageId::HotelReviews),
    ] {
        if let Some(rest) = path.strip_prefix(prefix) {
            return match rest.rsplit('/').find(|segment| !segment.is_empty()) {
                Some(id) => NavigationState::with_venue(page, id),
                None => NavigationState::home(),
            };
        }
    }

    match path {
        "/auth" => NavigationState::page(PageId::Auth),
        "/admin-dashboard" => NavigationState::page(PageId::AdminDashboard),
        "/user-account" => NavigationState::page(PageId::UserAccount),
        _ => NavigationState::home(),
    }
}

/// Keeps the history stack in step with the navigation state
#[derive(Clone)]
pub struct LocationSync {
    history: Rc<dyn HistoryBackend>,
}

impl LocationSync {
    pub fn new(history: Rc<dyn HistoryBackend>) -> Self {
        Self { history }
    }

    /// State implied by the address on first load
    pub fn initial_state(&self) -> NavigationState {
        decode(&self.history.current_path())
    }

    pub fn current_path(&self) -> String {
        self.history.current_path()
    }

    /// Push an entry when the state's path differs from the address.
    /// Returns whether an entry was pushed.
    pub fn sync(&self, state: &NavigationState) -> bool {
        sync_with(self.history.as_ref(), state)
    }

    pub fn back(&self) {
        self.history.back();
    }

    /// Deliver the restored state on back/forward: the entry's payload when
    /// it has one, otherwise the decoded address. The handler returns the
    /// state it actually adopted, and the address is synced to that.
    pub fn on_restore<F>(&self, handler: F)
    where
        F: Fn(NavigationState) -> NavigationState + 'static,
    {
        let history = Rc::downgrade(&self.history);
        self.history.on_pop_state(Rc::new(move |payload| {
            let Some(history) = history.upgrade() else {
                return;
            };
            let state = match payload {
                Some(state) => state,
                None => decode(&history.current_path()),
            };
            log::debug!("[NAV] Restored {:?} from history", state);
            let adopted = handler(state);
            sync_with(history.as_ref(), &adopted);
        }));
    }
}

fn sync_with(history: &dyn HistoryBackend, state: &NavigationState) -> bool {
    let path = encode(state);
    if history.current_path() == path {
        return false;
    }
    log::debug!("[NAV] pushState {}", path);
    history.push(state, &path);
    true
}
