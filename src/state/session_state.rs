// ============================================================================
// SESSION STATE - Login identity, persisted across reloads
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{ClientError, Result};
use crate::models::{LoginResponse, Session};
use crate::services::SessionStorage;

#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn SessionStorage>,
    key: String,
    session: Rc<RefCell<Option<Session>>>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            session: Rc::new(RefCell::new(None)),
        }
    }

    /// Load the persisted record. Anything unreadable is purged and the
    /// store ends up logged out; this never fails.
    pub fn restore(&self) -> Option<Session> {
        let restored = match self.read_persisted() {
            Ok(session) => session,
            Err(e) => {
                log::error!("[SESSION] {}, clearing stored record", e);
                self.purge();
                None
            }
        };

        if let Some(ref session) = restored {
            log::info!("[SESSION] Restored session for {}", session.username());
        }
        *self.session.borrow_mut() = restored.clone();
        restored
    }

    fn read_persisted(&self) -> Result<Option<Session>> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(e) => {
                log::warn!("[SESSION] Could not read stored session: {}", e);
                return Ok(None);
            }
        };

        let payload: LoginResponse = serde_json::from_str(&raw)
            .map_err(|e| ClientError::CorruptSession(e.to_string()))?;
        Session::from_login(&payload)
            .map(Some)
            .ok_or_else(|| ClientError::CorruptSession("missing user or token".to_string()))
    }

    fn purge(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            log::warn!("[SESSION] Could not remove stored session: {}", e);
        }
    }

    /// Accept the backend's login payload. Without a user block nothing is
    /// written and the current session is left as it was.
    pub fn login(&self, response: &LoginResponse) -> Result<Session> {
        let session = Session::from_login(response).ok_or(ClientError::IncompleteAuthData)?;

        match serde_json::to_string(response) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&self.key, &json) {
                    // Still logged in for this page load, just not after a reload
                    log::error!("[SESSION] Could not persist session: {}", e);
                }
            }
            Err(e) => log::error!("[SESSION] Could not serialize session: {}", e),
        }

        log::info!(
            "[SESSION] Logged in as {} (admin: {})",
            session.username(),
            session.is_admin()
        );
        *self.session.borrow_mut() = Some(session.clone());
        Ok(session)
    }

    pub fn logout(&self) {
        self.purge();
        *self.session.borrow_mut() = None;
        log::info!("[SESSION] Logged out");
    }

    /// Bearer token of the live session. `None` means: do not call the backend.
    pub fn current_token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.token().to_string())
    }

    pub fn require_token(&self) -> Result<String> {
        self.current_token().ok_or(ClientError::AuthRequired)
    }

    pub fn current(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session.borrow().as_ref().is_some_and(Session::is_admin)
    }
}
