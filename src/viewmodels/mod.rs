pub mod admin_viewmodel;
pub mod auth_viewmodel;
pub mod hotel_reviews_viewmodel;
pub mod navigation_viewmodel;

pub use admin_viewmodel::{AdminState, AdminViewModel, VenueEditor};
pub use auth_viewmodel::{AuthFormState, AuthMode, AuthViewModel};
pub use hotel_reviews_viewmodel::{HotelReviewsState, HotelReviewsViewModel};
pub use navigation_viewmodel::{AppSnapshot, NavigationController, Platform};
