// ============================================================================
// HISTORY - Navigation state persistence (browser history or in-memory stack)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::NavigationState;

/// Called on back/forward with the entry's payload (`None` for entries
/// that were never pushed by us, e.g. the first load)
pub type PopStateHandler = Rc<dyn Fn(Option<NavigationState>)>;

pub trait HistoryBackend {
    /// Path of the active entry
    fn current_path(&self) -> String;

    /// Add an entry after the active one, dropping any forward entries
    fn push(&self, state: &NavigationState, path: &str);

    /// Step back one entry; handlers fire once the entry is active
    fn back(&self);

    fn on_pop_state(&self, handler: PopStateHandler);
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    path: String,
    state: Option<NavigationState>,
}

/// History stack for non-browser targets.
///
/// `back`/`forward` dispatch synchronously, and are no-ops at either end.
pub struct MemoryHistory {
    entries: RefCell<Vec<HistoryEntry>>,
    cursor: Cell<usize>,
    handlers: RefCell<Vec<PopStateHandler>>,
}

impl MemoryHistory {
    pub fn new(initial_path: &str) -> Self {
        Self {
            entries: RefCell::new(vec![HistoryEntry {
                path: initial_path.to_string(),
                state: None,
            }]),
            cursor: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn paths(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|e| e.path.clone()).collect()
    }

    pub fn current_state(&self) -> Option<NavigationState> {
        self.entries.borrow()[self.cursor.get()].state.clone()
    }

    pub fn forward(&self) {
        let next = self.cursor.get() + 1;
        if next >= self.len() {
            return;
        }
        self.activate(next);
    }

    fn activate(&self, index: usize) {
        self.cursor.set(index);
        let state = self.entries.borrow()[index].state.clone();
        // Handlers may read the history again; no borrow is held while they run
        let handlers: Vec<PopStateHandler> = self.handlers.borrow().iter().cloned().collect();
        for handler in handlers {
            handler(state.clone());
        }
    }
}

impl HistoryBackend for MemoryHistory {
    fn current_path(&self) -> String {
        self.entries.borrow()[self.cursor.get()].path.clone()
    }

    fn push(&self, state: &NavigationState, path: &str) {
        let mut entries = self.entries.borrow_mut();
        entries.truncate(self.cursor.get() + 1);
        entries.push(HistoryEntry {
            path: path.to_string(),
            state: Some(state.clone()),
        });
        self.cursor.set(entries.len() - 1);
    }

    fn back(&self) {
        let current = self.cursor.get();
        if current == 0 {
            return;
        }
        self.activate(current - 1);
    }

    fn on_pop_state(&self, handler: PopStateHandler) {
        self.handlers.borrow_mut().push(handler);
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{window, PopStateEvent};

    use super::{HistoryBackend, PopStateHandler};
    use crate::models::NavigationState;

    /// `window.history`; payloads are stored as JSON strings
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserHistory;

    impl HistoryBackend for BrowserHistory {
        fn current_path(&self) -> String {
            window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string())
        }

        fn push(&self, state: &NavigationState, path: &str) {
            let Some(history) = window().and_then(|w| w.history().ok()) else {
                log::warn!("[NAV] window.history unavailable, not pushing {}", path);
                return;
            };
            let payload = match serde_json::to_string(state) {
                Ok(json) => JsValue::from_str(&json),
                Err(e) => {
                    log::error!("[NAV] Could not serialize history payload: {}", e);
                    JsValue::NULL
                }
            };
            if history.push_state_with_url(&payload, "", Some(path)).is_err() {
                log::error!("[NAV] pushState failed for {}", path);
            }
        }

        fn back(&self) {
            let Some(history) = window().and_then(|w| w.history().ok()) else {
                log::warn!("[NAV] window.history unavailable, cannot go back");
                return;
            };
            if history.back().is_err() {
                log::error!("[NAV] history.back failed");
            }
        }

        fn on_pop_state(&self, handler: PopStateHandler) {
            let Some(win) = window() else {
                return;
            };
            let closure = Closure::wrap(Box::new(move |event: PopStateEvent| {
                let state = event
                    .state()
                    .as_string()
                    .and_then(|json| serde_json::from_str::<NavigationState>(&json).ok());
                handler(state);
            }) as Box<dyn FnMut(PopStateEvent)>);

            if win
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
                .is_err()
            {
                log::error!("[NAV] Could not register popstate listener");
            }
            // Registered once at startup; the listener lives as long as the page
            closure.forget();
        }
    }
}
