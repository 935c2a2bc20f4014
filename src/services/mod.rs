// Capabilities the core depends on. Browser implementations only build on
// wasm32; the in-memory ones run anywhere.

pub mod api_client;
pub mod history;
pub mod scheduler;
pub mod storage;

pub use api_client::ReviewBackend;
pub use history::{HistoryBackend, MemoryHistory, PopStateHandler};
pub use scheduler::{ManualScheduler, ScheduledTask, Scheduler};
pub use storage::{MemoryStorage, SessionStorage};

#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
#[cfg(target_arch = "wasm32")]
pub use scheduler::TimeoutScheduler;
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
