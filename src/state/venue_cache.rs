// ============================================================================
// VENUE CACHE - Full venue list + client-side filtered view
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::models::Venue;
use crate::services::ReviewBackend;

#[derive(Debug, Default)]
struct VenueCacheInner {
    all: Vec<Venue>,
    displayed: Vec<Venue>,
    search_term: String,
    in_flight: usize,
    error: Option<String>,
}

/// `displayed` is always a subset of `all`, and equals it when the search
/// term is empty.
#[derive(Clone)]
pub struct VenueCache {
    backend: Rc<dyn ReviewBackend>,
    inner: Rc<RefCell<VenueCacheInner>>,
}

impl VenueCache {
    pub fn new(backend: Rc<dyn ReviewBackend>) -> Self {
        Self {
            backend,
            inner: Rc::new(RefCell::new(VenueCacheInner::default())),
        }
    }

    /// Re-fetch everything and clear the search. On failure both views are
    /// emptied and the error recorded; no retry. Overlapping calls are not
    /// deduplicated, whichever finishes last wins.
    pub async fn refresh(&self) -> Result<usize> {
        self.inner.borrow_mut().in_flight += 1;
        log::info!("[CACHE] Fetching hotels...");

        let result = self.backend.list_venues().await;

        let mut inner = self.inner.borrow_mut();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        inner.search_term.clear();
        match result {
            Ok(venues) => {
                log::info!("[CACHE] {} hotels loaded", venues.len());
                inner.displayed = venues.clone();
                inner.all = venues;
                inner.error = None;
                Ok(inner.all.len())
            }
            Err(e) => {
                log::error!("[CACHE] Failed to fetch hotels: {}", e);
                inner.all.clear();
                inner.displayed.clear();
                inner.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Filter `all` locally; never issues a request
    pub fn apply_search(&self, term: &str) {
        let mut inner = self.inner.borrow_mut();
        let needle = term.to_lowercase();
        inner.search_term = term.to_string();

        // only the empty term means "everything"; whitespace is matched as typed
        inner.displayed = if needle.is_empty() {
            inner.all.clone()
        } else {
            inner
                .all
                .iter()
                .filter(|v| v.matches(&needle))
                .cloned()
                .collect()
        };
        log::debug!(
            "[CACHE] Search {:?}: {} of {} hotels",
            term,
            inner.displayed.len(),
            inner.all.len()
        );
    }

    /// Looks in `all`, so venues hidden by the search stay reachable
    pub fn lookup(&self, id: &str) -> Option<Venue> {
        self.inner.borrow().all.iter().find(|v| v.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.borrow().all.iter().any(|v| v.id == id)
    }

    pub fn all(&self) -> Vec<Venue> {
        self.inner.borrow().all.clone()
    }

    pub fn displayed(&self) -> Vec<Venue> {
        self.inner.borrow().displayed.clone()
    }

    pub fn search_term(&self) -> String {
        self.inner.borrow().search_term.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().in_flight > 0
    }

    pub fn error(&self) -> Option<String> {
        self.inner.borrow().error.clone()
    }
}
