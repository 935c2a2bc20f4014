pub mod analytics;
pub mod navigation;
pub mod review;
pub mod session;
pub mod toast;
pub mod venue;

pub use analytics::{OverallAnalytics, VenueReviewStats};
pub use navigation::{NavigationState, PageId};
pub use review::{Review, ReviewHotel, ReviewSubmission, ReviewSubmitResponse};
pub use session::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, Session, SessionUser};
pub use toast::{Toast, ToastKind};
pub use venue::{Venue, VenueForm, VenueMutationResponse};
