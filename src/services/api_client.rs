// ============================================================================
// API CLIENT - HTTP only (stateless)
// ============================================================================
// No business logic here: one method per backend endpoint, JSON in/out.
// ============================================================================

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, OverallAnalytics, RegisterRequest, Review,
    ReviewSubmission, ReviewSubmitResponse, Venue, VenueForm, VenueMutationResponse,
    VenueReviewStats,
};

/// Backend REST surface consumed by the client
#[async_trait(?Send)]
pub trait ReviewBackend {
    async fn list_venues(&self) -> Result<Vec<Venue>>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse>;

    async fn submit_review(
        &self,
        token: &str,
        review: &ReviewSubmission,
    ) -> Result<ReviewSubmitResponse>;

    async fn venue_reviews(&self, venue_id: &str) -> Result<Vec<Review>>;

    async fn overall_analytics(&self, token: &str) -> Result<OverallAnalytics>;

    async fn reviews_per_venue(&self, token: &str) -> Result<Vec<VenueReviewStats>>;

    async fn recent_reviews(&self, token: &str) -> Result<Vec<Review>>;

    async fn create_venue(&self, token: &str, form: &VenueForm) -> Result<VenueMutationResponse>;

    async fn update_venue(
        &self,
        token: &str,
        venue_id: &str,
        form: &VenueForm,
    ) -> Result<VenueMutationResponse>;

    async fn delete_venue(&self, token: &str, venue_id: &str) -> Result<MessageResponse>;
}

/// Endpoint paths, relative to the backend base URL
pub mod endpoints {
    pub const HOTELS: &str = "/api/hotels";
    pub const LOGIN: &str = "/api/auth/login";
    pub const REGISTER: &str = "/api/auth/register";
    pub const REVIEWS: &str = "/api/reviews";
    pub const ANALYTICS_OVERALL: &str = "/api/analytics/overall";
    pub const ANALYTICS_REVIEWS_PER_HOTEL: &str = "/api/analytics/reviews-per-hotel";
    pub const ANALYTICS_RECENT_REVIEWS: &str = "/api/analytics/recent-reviews";

    pub fn hotel(venue_id: &str) -> String {
        format!("{}/{}", HOTELS, venue_id)
    }

    pub fn hotel_reviews(venue_id: &str) -> String {
        format!("{}/hotel/{}", REVIEWS, venue_id)
    }
}

const BODY_PREVIEW_CHARS: usize = 100;

/// Turn a status + raw body into a typed result.
///
/// Non-2xx becomes `HttpError` carrying the server's `message` when the body
/// has one. A 2xx body that is not JSON is a `NetworkFailure`; JSON of the
/// wrong shape is an `HttpError` with the received status.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    let ok = (200..300).contains(&status);
    let json = serde_json::from_str::<Value>(body);

    match (ok, json) {
        (false, Ok(value)) => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status));
            Err(ClientError::http(status, message))
        }
        (false, Err(_)) => Err(ClientError::http(
            status,
            format!("HTTP error! status: {}", status),
        )),
        (true, Err(_)) => {
            let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
            Err(ClientError::NetworkFailure(format!(
                "Server did not return JSON. Response: {}...",
                preview
            )))
        }
        (true, Ok(value)) => serde_json::from_value(value).map_err(|e| {
            ClientError::http(status, format!("Unexpected response from server: {}", e))
        }),
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[cfg(target_arch = "wasm32")]
pub use browser::ApiClient;

#[cfg(target_arch = "wasm32")]
mod browser {
    use async_trait::async_trait;
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::de::DeserializeOwned;
    use serde::Serialize;

    use super::{bearer, decode_response, endpoints, ReviewBackend};
    use crate::error::{ClientError, Result};
    use crate::models::{
        LoginRequest, LoginResponse, MessageResponse, OverallAnalytics, RegisterRequest, Review,
        ReviewSubmission, ReviewSubmitResponse, Venue, VenueForm, VenueMutationResponse,
        VenueReviewStats,
    };

    /// gloo-net client against the review backend
    #[derive(Debug, Clone)]
    pub struct ApiClient {
        base_url: String,
    }

    impl ApiClient {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into().trim_end_matches('/').to_string(),
            }
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        fn authorized(builder: RequestBuilder, token: &str) -> RequestBuilder {
            builder.header("Authorization", &bearer(token))
        }

        async fn read<T: DeserializeOwned>(response: Response) -> Result<T> {
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::NetworkFailure(e.to_string()))?;
            decode_response(status, &body)
        }

        async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
            let response = builder
                .send()
                .await
                .map_err(|e| ClientError::NetworkFailure(e.to_string()))?;
            Self::read(response).await
        }

        async fn send_json<B: Serialize, T: DeserializeOwned>(
            builder: RequestBuilder,
            body: &B,
        ) -> Result<T> {
            let request = builder
                .json(body)
                .map_err(|e| ClientError::NetworkFailure(format!("Serialization error: {}", e)))?;
            let response = request
                .send()
                .await
                .map_err(|e| ClientError::NetworkFailure(e.to_string()))?;
            Self::read(response).await
        }
    }

    #[async_trait(?Send)]
    impl ReviewBackend for ApiClient {
        async fn list_venues(&self) -> Result<Vec<Venue>> {
            log::debug!("[API] GET {}", endpoints::HOTELS);
            Self::send(Request::get(&self.url(endpoints::HOTELS))).await
        }

        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
            log::info!("[API] Login attempt for {}", request.email);
            Self::send_json(Request::post(&self.url(endpoints::LOGIN)), request).await
        }

        async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse> {
            log::info!("[API] Registering {}", request.username);
            Self::send_json(Request::post(&self.url(endpoints::REGISTER)), request).await
        }

        async fn submit_review(
            &self,
            token: &str,
            review: &ReviewSubmission,
        ) -> Result<ReviewSubmitResponse> {
            log::info!("[API] Submitting review for hotel {}", review.hotel);
            let builder = Self::authorized(Request::post(&self.url(endpoints::REVIEWS)), token);
            Self::send_json(builder, review).await
        }

        async fn venue_reviews(&self, venue_id: &str) -> Result<Vec<Review>> {
            Self::send(Request::get(&self.url(&endpoints::hotel_reviews(venue_id)))).await
        }

        async fn overall_analytics(&self, token: &str) -> Result<OverallAnalytics> {
            let builder =
                Self::authorized(Request::get(&self.url(endpoints::ANALYTICS_OVERALL)), token);
            Self::send(builder).await
        }

        async fn reviews_per_venue(&self, token: &str) -> Result<Vec<VenueReviewStats>> {
            let builder = Self::authorized(
                Request::get(&self.url(endpoints::ANALYTICS_REVIEWS_PER_HOTEL)),
                token,
            );
            Self::send(builder).await
        }

        async fn recent_reviews(&self, token: &str) -> Result<Vec<Review>> {
            let builder = Self::authorized(
                Request::get(&self.url(endpoints::ANALYTICS_RECENT_REVIEWS)),
                token,
            );
            Self::send(builder).await
        }

        async fn create_venue(
            &self,
            token: &str,
            form: &VenueForm,
        ) -> Result<VenueMutationResponse> {
            log::info!("[API] Creating hotel {}", form.name);
            let builder = Self::authorized(Request::post(&self.url(endpoints::HOTELS)), token);
            Self::send_json(builder, form).await
        }

        async fn update_venue(
            &self,
            token: &str,
            venue_id: &str,
            form: &VenueForm,
        ) -> Result<VenueMutationResponse> {
            log::info!("[API] Updating hotel {}", venue_id);
            let builder =
                Self::authorized(Request::put(&self.url(&endpoints::hotel(venue_id))), token);
            Self::send_json(builder, form).await
        }

        async fn delete_venue(&self, token: &str, venue_id: &str) -> Result<MessageResponse> {
            log::info!("[API] Deleting hotel {}", venue_id);
            let builder =
                Self::authorized(Request::delete(&self.url(&endpoints::hotel(venue_id))), token);
            Self::send(builder).await
        }
    }
}
