// ============================================================================
// STATE MODULE - Rc<RefCell> stores + change notifications
// ============================================================================

pub mod location;
pub mod notification;
pub mod reactivity;
pub mod session_state;
pub mod venue_cache;

pub use location::LocationSync;
pub use notification::NotificationEmitter;
pub use reactivity::ChangeNotifier;
pub use session_state::SessionStore;
pub use venue_cache::VenueCache;
