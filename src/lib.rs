// ============================================================================
// VENUE REVIEW CLIENT - Session, navigation and data core (MVVM)
// ============================================================================
// - Models: shapes shared with the backend
// - Services: capabilities (HTTP, storage, history, timers)
// - State: Rc<RefCell> stores + change notifications
// - ViewModels: navigation controller and page logic
// Presentation reads `NavigationController::snapshot()` and calls actions.
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;

#[cfg(test)]
mod test_support;

pub use config::{AppConfig, CONFIG};
pub use error::{ClientError, Result};
pub use viewmodels::{AppSnapshot, NavigationController, Platform};

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::config::CONFIG;
    use crate::services::{ApiClient, BrowserHistory, BrowserStorage, TimeoutScheduler};
    use crate::viewmodels::{NavigationController, Platform};

    thread_local! {
        static APP: RefCell<Option<NavigationController>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if CONFIG.is_logging_enabled() {
            wasm_logger::init(Config::new(CONFIG.log_level()));
        }
        log::info!("[MAIN] Venue review client, backend {}", CONFIG.backend_url());

        let controller = NavigationController::new(
            Platform {
                backend: Rc::new(ApiClient::new(CONFIG.backend_url())),
                storage: Rc::new(BrowserStorage),
                history: Rc::new(BrowserHistory),
                scheduler: Rc::new(TimeoutScheduler),
            },
            &CONFIG,
        );

        APP.with(|cell| *cell.borrow_mut() = Some(controller.clone()));
        wasm_bindgen_futures::spawn_local(async move { controller.start().await });
        Ok(())
    }

    /// The running controller, once `main` has executed
    pub fn controller() -> Option<NavigationController> {
        APP.with(|cell| cell.borrow().clone())
    }

    /// Current snapshot as JSON for a JS presentation layer
    #[wasm_bindgen]
    pub fn app_snapshot() -> Result<String, JsValue> {
        let controller = controller().ok_or_else(|| JsValue::from_str("App not initialized"))?;
        serde_json::to_string(&controller.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn app_search(term: &str) {
        if let Some(controller) = controller() {
            controller.search(term);
        }
    }

    #[wasm_bindgen]
    pub fn app_go_back() {
        if let Some(controller) = controller() {
            controller.go_back();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use entry::controller;
