// ============================================================================
// ADMIN VIEWMODEL - Analytics dashboard + venue management
// ============================================================================
// Every protected call goes through `guard`, which ends the session on a
// 401/403 via the navigation controller.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ClientError, Result};
use crate::models::{OverallAnalytics, Review, Venue, VenueForm, VenueReviewStats};
use crate::viewmodels::NavigationController;

pub const MSG_ADMIN_AUTH_REQUIRED: &str = "Authentication required. Please log in as an admin.";
pub const MSG_TOKEN_MISSING: &str = "Authentication token missing. Please log in again.";

/// Add/edit modal: `editing_id` is `None` when adding
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VenueEditor {
    pub editing_id: Option<String>,
    pub form: VenueForm,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminState {
    pub overall: Option<OverallAnalytics>,
    pub reviews_per_venue: Vec<VenueReviewStats>,
    pub recent_reviews: Vec<Review>,
    pub managed_venues: Vec<Venue>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    pub editor: Option<VenueEditor>,
    pub pending_delete: Option<String>,
}

#[derive(Clone)]
pub struct AdminViewModel {
    controller: NavigationController,
    state: Rc<RefCell<AdminState>>,
}

impl AdminViewModel {
    pub fn new(controller: NavigationController) -> Self {
        Self {
            controller,
            state: Rc::new(RefCell::new(AdminState::default())),
        }
    }

    pub fn state(&self) -> AdminState {
        self.state.borrow().clone()
    }

    fn guard<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.controller.handle_auth_failure(e);
        }
        result
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    pub async fn load_dashboard(&self) -> Result<()> {
        let Some(token) = self.controller.session().current_token() else {
            let mut state = self.state.borrow_mut();
            state.is_loading = false;
            state.error = Some(MSG_ADMIN_AUTH_REQUIRED.to_string());
            return Err(ClientError::AuthRequired);
        };

        {
            let mut state = self.state.borrow_mut();
            state.is_loading = true;
            state.error = None;
        }
        log::info!("[ADMIN] Loading dashboard");

        let result = self.fetch_dashboard(&token).await;

        let mut state = self.state.borrow_mut();
        state.is_loading = false;
        match result {
            Ok((overall, per_venue, recent, venues)) => {
                log::info!(
                    "[ADMIN] Dashboard loaded: {} hotels managed, {} recent reviews",
                    venues.len(),
                    recent.len()
                );
                state.overall = Some(overall);
                state.reviews_per_venue = per_venue;
                state.recent_reviews = recent;
                state.managed_venues = venues;
                Ok(())
            }
            Err(e) => {
                log::error!("[ADMIN] Failed to load analytics: {}", e);
                state.error = Some(format!("Failed to load analytics: {}", e));
                drop(state);
                self.guard(Err(e))
            }
        }
    }

    /// The four dashboard reads, one after another
    async fn fetch_dashboard(
        &self,
        token: &str,
    ) -> Result<(OverallAnalytics, Vec<VenueReviewStats>, Vec<Review>, Vec<Venue>)> {
        let backend = self.controller.backend();
        let overall = backend.overall_analytics(token).await?;
        let per_venue = backend.reviews_per_venue(token).await?;
        let recent = backend.recent_reviews(token).await?;
        let venues = backend.list_venues().await?;
        Ok((overall, per_venue, recent, venues))
    }

    // ------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------

    pub fn open_add(&self) {
        let mut state = self.state.borrow_mut();
        state.message = None;
        state.editor = Some(VenueEditor::default());
    }

    pub fn open_edit(&self, venue: &Venue) {
        let mut state = self.state.borrow_mut();
        state.message = None;
        state.editor = Some(VenueEditor {
            editing_id: Some(venue.id.clone()),
            form: VenueForm::from(venue),
        });
    }

    pub fn close_editor(&self) {
        self.state.borrow_mut().editor = None;
    }

    /// Apply a field edit to the open form; no-op when the editor is closed
    pub fn edit_form<F>(&self, edit: F)
    where
        F: FnOnce(&mut VenueForm),
    {
        if let Some(editor) = self.state.borrow_mut().editor.as_mut() {
            edit(&mut editor.form);
        }
    }

    pub async fn submit_venue(&self) -> Result<()> {
        let Some(editor) = self.state.borrow().editor.clone() else {
            return Err(ClientError::Validation("No hotel form is open.".into()));
        };
        if editor.form.name.trim().is_empty() || editor.form.location.trim().is_empty() {
            let err = ClientError::Validation("Name and location are required.".into());
            self.set_message(format!("Error: {}", err));
            return Err(err);
        }
        let Some(token) = self.controller.session().current_token() else {
            self.set_message(MSG_TOKEN_MISSING);
            return Err(ClientError::AuthRequired);
        };

        let backend = self.controller.backend();
        let result = match editor.editing_id.as_deref() {
            Some(id) => {
                log::info!("[ADMIN] Updating hotel {}", id);
                backend.update_venue(&token, id, &editor.form).await
            }
            None => {
                log::info!("[ADMIN] Adding hotel {}", editor.form.name);
                backend.create_venue(&token, &editor.form).await
            }
        };

        match result {
            Ok(response) => {
                self.set_message(response.message.unwrap_or_else(|| "Hotel saved.".to_string()));
                self.after_mutation().await;
                self.close_editor();
                Ok(())
            }
            Err(e) => {
                log::error!("[ADMIN] Hotel operation failed: {}", e);
                self.set_message(format!("Error: {}", e));
                self.guard(Err(e))
            }
        }
    }

    // ------------------------------------------------------------------
    // Deletion
    // ------------------------------------------------------------------

    pub fn request_delete(&self, venue_id: &str) {
        self.state.borrow_mut().pending_delete = Some(venue_id.to_string());
    }

    pub fn cancel_delete(&self) {
        self.state.borrow_mut().pending_delete = None;
    }

    pub async fn confirm_delete(&self) -> Result<()> {
        let Some(venue_id) = self.state.borrow_mut().pending_delete.take() else {
            return Err(ClientError::Validation("No hotel selected for deletion.".into()));
        };
        self.state.borrow_mut().message = None;
        let Some(token) = self.controller.session().current_token() else {
            self.set_message(MSG_TOKEN_MISSING);
            return Err(ClientError::AuthRequired);
        };

        log::info!("[ADMIN] Deleting hotel {}", venue_id);
        match self.controller.backend().delete_venue(&token, &venue_id).await {
            Ok(response) => {
                self.set_message(response.message.unwrap_or_else(|| "Hotel deleted.".to_string()));
                self.after_mutation().await;
                Ok(())
            }
            Err(e) => {
                log::error!("[ADMIN] Hotel deletion failed: {}", e);
                self.set_message(format!("Error: {}", e));
                self.guard(Err(e))
            }
        }
    }

    async fn after_mutation(&self) {
        if let Err(e) = self.controller.venues_changed().await {
            log::warn!("[ADMIN] Hotel list refresh failed: {}", e);
        }
        // failure is already recorded in state.error
        let _ = self.load_dashboard().await;
    }

    fn set_message(&self, message: impl Into<String>) {
        self.state.borrow_mut().message = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MessageResponse, PageId, VenueMutationResponse};
    use crate::test_support::{admin_login, harness, venue, Harness};
    use crate::viewmodels::navigation_viewmodel::MSG_SESSION_EXPIRED;
    use futures::executor::block_on;

    fn admin_harness() -> (Harness, AdminViewModel) {
        let h = harness("/").with_venues(vec![venue("1", "Sea View", "Nice")]);
        block_on(h.controller.start());
        h.controller.login(&admin_login()).unwrap();
        h.controller.click_username();
        let vm = AdminViewModel::new(h.controller.clone());
        (h, vm)
    }

    #[test]
    fn dashboard_fetches_in_order_with_token() {
        let (h, vm) = admin_harness();
        h.backend.set_overall(Ok(OverallAnalytics {
            total_hotels: 1,
            total_users: 3,
            total_reviews: 7,
            average_rating: 4.2,
        }));
        let recent: Review = serde_json::from_value(serde_json::json!({
            "_id": "r1",
            "hotel": {"_id": "1", "name": "Sea View"},
            "userName": "bob",
            "rating": 5,
            "comment": "Great"
        }))
        .unwrap();
        h.backend.set_recent(Ok(vec![recent]));
        let before = h.backend.calls().len();

        block_on(vm.load_dashboard()).unwrap();

        let methods = h.backend.methods()[before..].to_vec();
        assert_eq!(
            methods,
            vec!["overall_analytics", "reviews_per_venue", "recent_reviews", "list_venues"]
        );
        assert_eq!(h.backend.last_token("recent_reviews").as_deref(), Some("token-admin"));
        let state = vm.state();
        assert_eq!(state.overall.unwrap().total_reviews, 7);
        assert_eq!(state.recent_reviews.len(), 1);
        let hotel = state.recent_reviews[0].hotel.as_ref().unwrap();
        assert_eq!((hotel.id(), hotel.name()), ("1", Some("Sea View")));
        assert_eq!(state.managed_venues.len(), 1);
        assert!(!state.is_loading);
    }

    #[test]
    fn dashboard_without_session_makes_no_requests() {
        let h = harness("/");
        let vm = AdminViewModel::new(h.controller.clone());

        assert_eq!(block_on(vm.load_dashboard()), Err(ClientError::AuthRequired));
        assert_eq!(vm.state().error.as_deref(), Some(MSG_ADMIN_AUTH_REQUIRED));
        assert!(h.backend.calls().is_empty());
    }

    #[test]
    fn dashboard_failure_stops_the_sequence() {
        let (h, vm) = admin_harness();
        h.backend
            .set_per_venue(Err(ClientError::http(500, "Server error")));

        assert!(block_on(vm.load_dashboard()).is_err());
        assert_eq!(h.backend.count_calls("recent_reviews"), 0);
        assert_eq!(
            vm.state().error.as_deref(),
            Some("Failed to load analytics: Server error")
        );
        assert!(h.controller.session().is_logged_in());
    }

    #[test]
    fn forbidden_analytics_forces_logout() {
        let (h, vm) = admin_harness();
        h.backend
            .set_overall(Err(ClientError::http(403, "Access denied")));

        assert!(block_on(vm.load_dashboard()).is_err());
        assert!(!h.controller.session().is_logged_in());
        assert_eq!(h.controller.page(), PageId::Home);
        assert_eq!(h.controller.toasts().current().unwrap().message, MSG_SESSION_EXPIRED);
    }

    #[test]
    fn adding_a_venue_refreshes_cache_and_closes_editor() {
        let (h, vm) = admin_harness();
        h.backend.set_mutation(Ok(VenueMutationResponse {
            message: Some("Hotel added successfully".into()),
            hotel: None,
        }));
        vm.open_add();
        vm.edit_form(|form| {
            form.name = "Inn".into();
            form.location = "Oslo".into();
        });
        h.backend.set_venues(Ok(vec![
            venue("1", "Sea View", "Nice"),
            venue("2", "Inn", "Oslo"),
        ]));

        block_on(vm.submit_venue()).unwrap();

        let state = vm.state();
        assert!(state.editor.is_none());
        assert_eq!(state.message.as_deref(), Some("Hotel added successfully"));
        assert_eq!(state.managed_venues.len(), 2);
        assert_eq!(h.controller.venues().all().len(), 2);
        assert_eq!(h.backend.count_calls("create_venue"), 1);
    }

    #[test]
    fn editing_issues_update_for_that_id() {
        let (h, vm) = admin_harness();
        vm.open_edit(&venue("1", "Sea View", "Nice"));
        assert_eq!(vm.state().editor.unwrap().form.name, "Sea View");
        vm.edit_form(|form| form.name = "Sea View Deluxe".into());

        block_on(vm.submit_venue()).unwrap();

        assert_eq!(
            h.backend.last_call("update_venue").unwrap().target.as_deref(),
            Some("1")
        );
        assert_eq!(h.backend.count_calls("create_venue"), 0);
    }

    #[test]
    fn missing_name_or_location_is_rejected_locally() {
        let (h, vm) = admin_harness();
        vm.open_add();
        vm.edit_form(|form| form.name = "Inn".into());

        assert!(matches!(
            block_on(vm.submit_venue()),
            Err(ClientError::Validation(_))
        ));
        assert!(vm.state().editor.is_some());
        assert_eq!(h.backend.count_calls("create_venue"), 0);
    }

    #[test]
    fn expired_token_on_update_forces_logout() {
        let (h, vm) = admin_harness();
        h.backend
            .set_mutation(Err(ClientError::http(401, "Invalid or expired token")));
        vm.open_edit(&venue("1", "Sea View", "Nice"));

        assert!(block_on(vm.submit_venue()).is_err());
        assert_eq!(
            vm.state().message.as_deref(),
            Some("Error: Invalid or expired token")
        );
        assert!(!h.controller.session().is_logged_in());
    }

    #[test]
    fn deletion_needs_confirmation() {
        let (h, vm) = admin_harness();
        h.backend.set_delete(Ok(MessageResponse {
            message: Some("Hotel deleted successfully".into()),
        }));

        vm.request_delete("1");
        vm.cancel_delete();
        assert!(block_on(vm.confirm_delete()).is_err());
        assert_eq!(h.backend.count_calls("delete_venue"), 0);

        vm.request_delete("1");
        h.backend.set_venues(Ok(Vec::new()));
        block_on(vm.confirm_delete()).unwrap();

        let state = vm.state();
        assert!(state.pending_delete.is_none());
        assert_eq!(state.message.as_deref(), Some("Hotel deleted successfully"));
        assert!(h.controller.venues().all().is_empty());
    }

    #[test]
    fn deleting_the_open_venue_sends_viewer_home() {
        let (h, vm) = admin_harness();
        h.controller.open_venue_reviews("1").unwrap();

        vm.request_delete("1");
        h.backend.set_venues(Ok(Vec::new()));
        block_on(vm.confirm_delete()).unwrap();

        assert_eq!(h.controller.page(), PageId::Home);
    }
}
