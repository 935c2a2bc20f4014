// ============================================================================
// TEST SUPPORT - Scripted backend + in-memory platform
// ============================================================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::config::AppConfig;
use crate::error::{ClientError, Result};
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, OverallAnalytics, RegisterRequest, Review,
    ReviewSubmission, ReviewSubmitResponse, SessionUser, Venue, VenueForm, VenueMutationResponse,
    VenueReviewStats,
};
use crate::services::{ManualScheduler, MemoryHistory, MemoryStorage, ReviewBackend};
use crate::viewmodels::{NavigationController, Platform};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub token: Option<String>,
    pub target: Option<String>,
}

/// Every endpoint answers with whatever result was last scripted for it
pub struct FakeBackend {
    venues: RefCell<Result<Vec<Venue>>>,
    venue_gates: RefCell<VecDeque<oneshot::Receiver<Result<Vec<Venue>>>>>,
    login: RefCell<Result<LoginResponse>>,
    register: RefCell<Result<MessageResponse>>,
    submit: RefCell<Result<ReviewSubmitResponse>>,
    reviews: RefCell<Result<Vec<Review>>>,
    overall: RefCell<Result<OverallAnalytics>>,
    per_venue: RefCell<Result<Vec<VenueReviewStats>>>,
    recent: RefCell<Result<Vec<Review>>>,
    mutation: RefCell<Result<VenueMutationResponse>>,
    delete: RefCell<Result<MessageResponse>>,
    calls: RefCell<Vec<Call>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            venues: RefCell::new(Ok(Vec::new())),
            venue_gates: RefCell::new(VecDeque::new()),
            login: RefCell::new(Ok(login_payload("bob", false))),
            register: RefCell::new(Ok(MessageResponse::default())),
            submit: RefCell::new(Ok(ReviewSubmitResponse::default())),
            reviews: RefCell::new(Ok(Vec::new())),
            overall: RefCell::new(Ok(OverallAnalytics::default())),
            per_venue: RefCell::new(Ok(Vec::new())),
            recent: RefCell::new(Ok(Vec::new())),
            mutation: RefCell::new(Ok(VenueMutationResponse::default())),
            delete: RefCell::new(Ok(MessageResponse::default())),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeBackend {
    pub fn with_venues(venues: Vec<Venue>) -> Self {
        let backend = Self::default();
        backend.set_venues(Ok(venues));
        backend
    }

    pub fn set_venues(&self, result: Result<Vec<Venue>>) {
        *self.venues.borrow_mut() = result;
    }

    /// Park the next `list_venues` call until the returned sender answers it
    pub fn hold_venues(&self) -> oneshot::Sender<Result<Vec<Venue>>> {
        let (sender, receiver) = oneshot::channel();
        self.venue_gates.borrow_mut().push_back(receiver);
        sender
    }

    pub fn set_login(&self, result: Result<LoginResponse>) {
        *self.login.borrow_mut() = result;
    }

    pub fn set_register(&self, result: Result<MessageResponse>) {
        *self.register.borrow_mut() = result;
    }

    pub fn set_submit(&self, result: Result<ReviewSubmitResponse>) {
        *self.submit.borrow_mut() = result;
    }

    pub fn set_reviews(&self, result: Result<Vec<Review>>) {
        *self.reviews.borrow_mut() = result;
    }

    pub fn set_overall(&self, result: Result<OverallAnalytics>) {
        *self.overall.borrow_mut() = result;
    }

    pub fn set_per_venue(&self, result: Result<Vec<VenueReviewStats>>) {
        *self.per_venue.borrow_mut() = result;
    }

    pub fn set_recent(&self, result: Result<Vec<Review>>) {
        *self.recent.borrow_mut() = result;
    }

    pub fn set_mutation(&self, result: Result<VenueMutationResponse>) {
        *self.mutation.borrow_mut() = result;
    }

    pub fn set_delete(&self, result: Result<MessageResponse>) {
        *self.delete.borrow_mut() = result;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn methods(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|c| c.method).collect()
    }

    pub fn count_calls(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.method == method).count()
    }

    pub fn last_call(&self, method: &str) -> Option<Call> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|c| c.method == method)
            .cloned()
    }

    pub fn last_token(&self, method: &str) -> Option<String> {
        self.last_call(method).and_then(|c| c.token)
    }

    fn record(&self, method: &'static str, token: Option<&str>, target: Option<&str>) {
        self.calls.borrow_mut().push(Call {
            method,
            token: token.map(str::to_string),
            target: target.map(str::to_string),
        });
    }
}

#[async_trait(?Send)]
impl ReviewBackend for FakeBackend {
    async fn list_venues(&self) -> Result<Vec<Venue>> {
        self.record("list_venues", None, None);
        let gate = self.venue_gates.borrow_mut().pop_front();
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(ClientError::NetworkFailure("request dropped".into()))),
            None => self.venues.borrow().clone(),
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.record("login", None, Some(&request.email));
        self.login.borrow().clone()
    }

    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse> {
        self.record("register", None, Some(&request.username));
        self.register.borrow().clone()
    }

    async fn submit_review(
        &self,
        token: &str,
        review: &ReviewSubmission,
    ) -> Result<ReviewSubmitResponse> {
        self.record("submit_review", Some(token), Some(&review.hotel));
        self.submit.borrow().clone()
    }

    async fn venue_reviews(&self, venue_id: &str) -> Result<Vec<Review>> {
        self.record("venue_reviews", None, Some(venue_id));
        self.reviews.borrow().clone()
    }

    async fn overall_analytics(&self, token: &str) -> Result<OverallAnalytics> {
        self.record("overall_analytics", Some(token), None);
        self.overall.borrow().clone()
    }

    async fn reviews_per_venue(&self, token: &str) -> Result<Vec<VenueReviewStats>> {
        self.record("reviews_per_venue", Some(token), None);
        self.per_venue.borrow().clone()
    }

    async fn recent_reviews(&self, token: &str) -> Result<Vec<Review>> {
        self.record("recent_reviews", Some(token), None);
        self.recent.borrow().clone()
    }

    async fn create_venue(&self, token: &str, form: &VenueForm) -> Result<VenueMutationResponse> {
        self.record("create_venue", Some(token), Some(&form.name));
        self.mutation.borrow().clone()
    }

    async fn update_venue(
        &self,
        token: &str,
        venue_id: &str,
        _form: &VenueForm,
    ) -> Result<VenueMutationResponse> {
        self.record("update_venue", Some(token), Some(venue_id));
        self.mutation.borrow().clone()
    }

    async fn delete_venue(&self, token: &str, venue_id: &str) -> Result<MessageResponse> {
        self.record("delete_venue", Some(token), Some(venue_id));
        self.delete.borrow().clone()
    }
}

pub fn venue(id: &str, name: &str, location: &str) -> Venue {
    Venue {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        description: None,
        image_url: None,
    }
}

pub fn login_payload(username: &str, is_admin: bool) -> LoginResponse {
    LoginResponse {
        message: Some("Logged in".to_string()),
        token: Some(format!("token-{}", username)),
        user: Some(SessionUser {
            id: format!("id-{}", username),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            is_admin,
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn admin_login() -> LoginResponse {
    login_payload("admin", true)
}

/// A controller wired to in-memory capabilities, handles kept for assertions
pub struct Harness {
    pub controller: NavigationController,
    pub backend: Rc<FakeBackend>,
    pub storage: Rc<MemoryStorage>,
    pub history: Rc<MemoryHistory>,
    pub scheduler: Rc<ManualScheduler>,
}

impl Harness {
    pub fn with_venues(self, venues: Vec<Venue>) -> Self {
        self.backend.set_venues(Ok(venues));
        self
    }
}

pub fn harness(initial_path: &str) -> Harness {
    let backend = Rc::new(FakeBackend::default());
    let storage = Rc::new(MemoryStorage::new());
    let history = Rc::new(MemoryHistory::new(initial_path));
    let scheduler = Rc::new(ManualScheduler::new());

    let controller = NavigationController::new(
        Platform {
            backend: backend.clone(),
            storage: storage.clone(),
            history: history.clone(),
            scheduler: scheduler.clone(),
        },
        &AppConfig::default(),
    );

    Harness {
        controller,
        backend,
        storage,
        history,
        scheduler,
    }
}
