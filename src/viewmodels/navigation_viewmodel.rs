// ============================================================================
// NAVIGATION VIEWMODEL - Page state machine + guarded actions
// ============================================================================
// Owns the session, venue cache, location sync and toasts. Presentation
// reads `snapshot()` and calls the action methods; every failure ends here
// as a toast (plus a forced navigation where needed), never as a fault.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{ClientError, Result};
use crate::models::{
    LoginResponse, NavigationState, PageId, ReviewSubmission, ReviewSubmitResponse, SessionUser,
    Toast, Venue,
};
use crate::services::{HistoryBackend, ReviewBackend, Scheduler, SessionStorage};
use crate::state::{ChangeNotifier, LocationSync, NotificationEmitter, SessionStore, VenueCache};

pub const MSG_LOGIN_SUCCESS: &str = "Logged in successfully!";
pub const MSG_LOGIN_INCOMPLETE: &str =
    "Login failed due to incomplete user data. Please try again.";
pub const MSG_LOGOUT_SUCCESS: &str = "Logged out successfully!";
pub const MSG_REVIEW_VENUE_NOT_FOUND: &str =
    "Error: Hotel not found for review. Please try again.";
pub const MSG_REVIEWS_VENUE_NOT_FOUND: &str =
    "Error: Hotel not found to view reviews. Please try again.";
pub const MSG_LOGIN_TO_REVIEW: &str = "Please log in to write a review.";
pub const MSG_MUST_BE_LOGGED_IN: &str = "You must be logged in to submit a review.";
pub const MSG_REVIEW_SUBMITTED: &str =
    "Review submitted successfully! Thank you for your feedback.";
pub const MSG_SESSION_EXPIRED: &str =
    "Your session has expired or you do not have admin privileges. Please log in again.";

/// Platform capabilities the controller runs on
#[derive(Clone)]
pub struct Platform {
    pub backend: Rc<dyn ReviewBackend>,
    pub storage: Rc<dyn SessionStorage>,
    pub history: Rc<dyn HistoryBackend>,
    pub scheduler: Rc<dyn Scheduler>,
}

/// Everything presentation needs for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub navigation: NavigationState,
    pub user: Option<SessionUser>,
    pub selected_venue: Option<Venue>,
    pub venues: Vec<Venue>,
    pub search_term: String,
    pub is_loading: bool,
    pub load_error: Option<String>,
    pub toast: Option<Toast>,
}

impl AppSnapshot {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Clone)]
pub struct NavigationController {
    backend: Rc<dyn ReviewBackend>,
    session: SessionStore,
    venues: VenueCache,
    location: LocationSync,
    toasts: NotificationEmitter,
    navigation: Rc<RefCell<NavigationState>>,
    changes: ChangeNotifier,
}

impl NavigationController {
    pub fn new(platform: Platform, config: &AppConfig) -> Self {
        let changes = ChangeNotifier::new();
        Self {
            session: SessionStore::new(platform.storage, config.session_storage_key.clone()),
            venues: VenueCache::new(platform.backend.clone()),
            location: LocationSync::new(platform.history),
            toasts: NotificationEmitter::new(
                platform.scheduler,
                config.toast_duration_ms,
                changes.clone(),
            ),
            backend: platform.backend,
            navigation: Rc::new(RefCell::new(NavigationState::home())),
            changes,
        }
    }

    /// Startup sequence; call once. Restores the session, adopts the page
    /// encoded in the address, listens for back/forward, then loads venues.
    pub async fn start(&self) {
        log::info!("[NAV] Starting");
        self.session.restore();
        *self.navigation.borrow_mut() = self.location.initial_state();
        self.listen_for_history();
        self.changes.notify();

        if let Err(e) = self.venues_changed().await {
            log::warn!("[NAV] Initial hotel load failed: {}", e);
        }
    }

    /// Back/forward restores the entry's state exactly, unless it points at
    /// a venue the settled cache no longer has. A cache still loading is
    /// checked by `venues_changed` once it settles.
    fn listen_for_history(&self) {
        let navigation = Rc::downgrade(&self.navigation);
        let venues = self.venues.clone();
        let changes = self.changes.clone();
        self.location.on_restore(move |state| {
            let state = if venues.is_loading() || selection_resolves(&venues, &state) {
                state
            } else {
                log::warn!(
                    "[NAV] History entry {:?} no longer resolves to a hotel, going home",
                    state.selected_venue_id
                );
                NavigationState::home()
            };
            if let Some(navigation) = navigation.upgrade() {
                *navigation.borrow_mut() = state.clone();
                changes.notify();
            }
            state
        });
    }

    // ------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------

    pub fn navigation(&self) -> NavigationState {
        self.navigation.borrow().clone()
    }

    pub fn page(&self) -> PageId {
        self.navigation.borrow().page
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn venues(&self) -> &VenueCache {
        &self.venues
    }

    pub fn toasts(&self) -> &NotificationEmitter {
        &self.toasts
    }

    pub fn backend(&self) -> Rc<dyn ReviewBackend> {
        self.backend.clone()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.changes.subscribe(callback);
    }

    pub fn selected_venue(&self) -> Option<Venue> {
        let id = self.navigation.borrow().selected_venue_id.clone()?;
        self.venues.lookup(&id)
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            navigation: self.navigation(),
            user: self.session.current().map(|s| s.user().clone()),
            selected_venue: self.selected_venue(),
            venues: self.venues.displayed(),
            search_term: self.venues.search_term(),
            is_loading: self.venues.is_loading(),
            load_error: self.venues.error(),
            toast: self.toasts.current(),
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn transition(&self, next: NavigationState) {
        log::info!(
            "[NAV] {} -> {} ({:?})",
            self.page().as_str(),
            next.page.as_str(),
            next.selected_venue_id
        );
        *self.navigation.borrow_mut() = next.clone();
        self.location.sync(&next);
        self.changes.notify();
    }

    fn set_page(&self, page: PageId) {
        let mut next = self.navigation();
        next.page = page;
        self.transition(next);
    }

    pub fn go_home(&self) {
        self.transition(NavigationState::home());
    }

    pub fn navigate_to_auth(&self) {
        self.set_page(PageId::Auth);
    }

    /// Hand over the full login payload from the auth form
    pub fn login(&self, response: &LoginResponse) -> Result<()> {
        match self.session.login(response) {
            Ok(_) => {
                self.set_page(PageId::Home);
                self.toasts.success(MSG_LOGIN_SUCCESS);
                Ok(())
            }
            Err(e) => {
                log::error!("[NAV] Login payload rejected: {}", e);
                self.toasts.error(MSG_LOGIN_INCOMPLETE);
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        self.session.logout();
        self.set_page(PageId::Home);
        self.toasts.success(MSG_LOGOUT_SUCCESS);
    }

    /// Logout imposed by a rejected credential
    pub fn force_logout(&self, message: &str) {
        log::warn!("[NAV] Forcing logout: {}", message);
        self.session.logout();
        self.set_page(PageId::Home);
        self.toasts.error(message);
    }

    /// 401/403 from a protected endpoint ends the session. Returns whether
    /// the error was handled that way.
    pub fn handle_auth_failure(&self, error: &ClientError) -> bool {
        if error.is_auth_rejection() {
            self.force_logout(MSG_SESSION_EXPIRED);
            true
        } else {
            false
        }
    }

    pub fn click_username(&self) {
        let Some(session) = self.session.current() else {
            log::warn!("[NAV] Username clicked without a session");
            return;
        };
        if session.is_admin() {
            self.set_page(PageId::AdminDashboard);
        } else {
            self.set_page(PageId::UserAccount);
        }
    }

    /// Venue existence is checked against the full list, not the search view
    pub fn open_review_form(&self, venue_id: &str) -> Result<()> {
        if !self.venues.contains(venue_id) {
            log::error!("[NAV] Review form requested for unknown hotel {}", venue_id);
            self.toasts.error(MSG_REVIEW_VENUE_NOT_FOUND);
            return Err(ClientError::EntityNotFound(venue_id.to_string()));
        }
        if !self.session.is_logged_in() {
            self.toasts.error(MSG_LOGIN_TO_REVIEW);
            self.set_page(PageId::Auth);
            return Err(ClientError::AuthRequired);
        }
        self.transition(NavigationState::with_venue(PageId::ReviewForm, venue_id));
        Ok(())
    }

    pub fn open_venue_reviews(&self, venue_id: &str) -> Result<()> {
        if !self.venues.contains(venue_id) {
            log::error!("[NAV] Reviews requested for unknown hotel {}", venue_id);
            self.toasts.error(MSG_REVIEWS_VENUE_NOT_FOUND);
            return Err(ClientError::EntityNotFound(venue_id.to_string()));
        }
        self.transition(NavigationState::with_venue(PageId::HotelReviews, venue_id));
        Ok(())
    }

    pub async fn submit_review(&self, review: &ReviewSubmission) -> Result<ReviewSubmitResponse> {
        let Some(token) = self.session.current_token() else {
            self.toasts.error(MSG_MUST_BE_LOGGED_IN);
            return Err(ClientError::AuthRequired);
        };
        if let Err(e) = review.validate() {
            self.toasts.error(e.to_string());
            return Err(e);
        }

        match self.backend.submit_review(&token, review).await {
            Ok(response) => {
                log::info!("[NAV] Review stored for hotel {}", review.hotel);
                self.toasts.success(MSG_REVIEW_SUBMITTED);
                self.set_page(PageId::Home);
                Ok(response)
            }
            Err(e) => {
                log::error!("[NAV] Review submission failed: {}", e);
                if !self.handle_auth_failure(&e) {
                    self.toasts
                        .error(format!("Error submitting review: {}. Please try again.", e));
                }
                Err(e)
            }
        }
    }

    /// Clear the selection and step back in history. A venue page is
    /// demoted to home until the popped entry restores the real state.
    pub fn go_back(&self) {
        {
            let mut navigation = self.navigation.borrow_mut();
            navigation.selected_venue_id = None;
            if navigation.page.requires_venue() {
                navigation.page = PageId::Home;
            }
        }
        self.changes.notify();
        self.location.back();
    }

    pub fn search(&self, term: &str) {
        self.venues.apply_search(term);
        self.changes.notify();
    }

    /// Venues were edited elsewhere (admin console): reload the cache
    pub async fn venues_changed(&self) -> Result<usize> {
        let result = self.venues.refresh().await;
        self.ensure_selection_resolves();
        self.changes.notify();
        result
    }

    fn ensure_selection_resolves(&self) {
        let navigation = self.navigation();
        if !selection_resolves(&self.venues, &navigation) {
            log::warn!(
                "[NAV] {:?} no longer resolves to a hotel, going home",
                navigation.selected_venue_id
            );
            self.go_home();
        }
    }
}

/// A venue page must point at a venue in the full list
fn selection_resolves(venues: &VenueCache, state: &NavigationState) -> bool {
    !state.page.requires_venue()
        || state
            .selected_venue_id
            .as_deref()
            .is_some_and(|id| venues.contains(id))
}
