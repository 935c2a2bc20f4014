// ============================================================================
// AUTH VIEWMODEL - Login / register form
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};
use crate::models::{LoginRequest, RegisterRequest};
use crate::viewmodels::NavigationController;

const NETWORK_FAILURE_TEXT: &str = "Network error or server unreachable.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub message: Option<String>,
    pub is_loading: bool,
}

#[derive(Clone)]
pub struct AuthViewModel {
    controller: NavigationController,
    state: Rc<RefCell<AuthFormState>>,
}

impl AuthViewModel {
    pub fn new(controller: NavigationController) -> Self {
        Self {
            controller,
            state: Rc::new(RefCell::new(AuthFormState::default())),
        }
    }

    pub fn state(&self) -> AuthFormState {
        self.state.borrow().clone()
    }

    /// Switching mode clears the previous message
    pub fn set_mode(&self, mode: AuthMode) {
        let mut state = self.state.borrow_mut();
        state.mode = mode;
        state.message = None;
    }

    pub fn toggle_mode(&self) {
        let next = match self.state.borrow().mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.set_mode(next);
    }

    fn begin(&self) {
        let mut state = self.state.borrow_mut();
        state.message = None;
        state.is_loading = true;
    }

    fn finish(&self, message: Option<String>) {
        let mut state = self.state.borrow_mut();
        state.is_loading = false;
        state.message = message;
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() || password.is_empty() {
            let err = ClientError::Validation("Email and password are required.".into());
            self.finish(Some(err.to_string()));
            return Err(err);
        }

        self.begin();
        log::info!("[AUTH] Logging in {}", email);
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        match self.controller.backend().login(&request).await {
            Ok(response) => {
                let outcome = self.controller.login(&response);
                let message = match &outcome {
                    Ok(()) => "Login successful!".to_string(),
                    Err(e) => format!("Login failed: {}", e),
                };
                self.finish(Some(message));
                outcome
            }
            Err(e) => {
                log::error!("[AUTH] Login failed: {}", e);
                self.finish(Some(format!("Login failed: {}", failure_text(&e))));
                Err(e)
            }
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            let err = ClientError::Validation("Username, email and password are required.".into());
            self.finish(Some(err.to_string()));
            return Err(err);
        }

        self.begin();
        log::info!("[AUTH] Registering {}", username);
        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        match self.controller.backend().register(&request).await {
            Ok(_) => {
                self.finish(Some(format!(
                    "Registration successful for {}! Please log in.",
                    request.username
                )));
                self.state.borrow_mut().mode = AuthMode::Login;
                Ok(())
            }
            Err(e) => {
                log::error!("[AUTH] Registration failed: {}", e);
                self.finish(Some(format!("Registration failed: {}", failure_text(&e))));
                Err(e)
            }
        }
    }
}

fn failure_text(error: &ClientError) -> String {
    match error {
        ClientError::NetworkFailure(_) => NETWORK_FAILURE_TEXT.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginResponse, PageId};
    use crate::test_support::{harness, login_payload};
    use futures::executor::block_on;

    #[test]
    fn successful_login_hands_payload_to_controller() {
        let h = harness("/auth");
        block_on(h.controller.start());
        h.backend.set_login(Ok(login_payload("carol", false)));
        let vm = AuthViewModel::new(h.controller.clone());

        block_on(vm.login("carol@example.com", "pw")).unwrap();

        assert!(!vm.state().is_loading);
        assert_eq!(h.controller.session().current().unwrap().username(), "carol");
        assert_eq!(h.controller.page(), PageId::Home);
    }

    #[test]
    fn rejected_credentials_show_server_message() {
        let h = harness("/auth");
        h.backend.set_login(Err(ClientError::http(400, "Invalid credentials")));
        let vm = AuthViewModel::new(h.controller.clone());

        assert!(block_on(vm.login("a@b.c", "bad")).is_err());
        assert_eq!(
            vm.state().message.as_deref(),
            Some("Login failed: Invalid credentials")
        );
        assert!(!h.controller.session().is_logged_in());
    }

    #[test]
    fn unreachable_server_message() {
        let h = harness("/auth");
        h.backend
            .set_login(Err(ClientError::NetworkFailure("Failed to fetch".into())));
        let vm = AuthViewModel::new(h.controller.clone());

        let _ = block_on(vm.login("a@b.c", "pw"));
        assert_eq!(
            vm.state().message.as_deref(),
            Some("Login failed: Network error or server unreachable.")
        );
    }

    #[test]
    fn payload_without_user_is_rejected_by_controller() {
        let h = harness("/auth");
        block_on(h.controller.start());
        h.backend.set_login(Ok(LoginResponse {
            token: Some("t".into()),
            ..Default::default()
        }));
        let vm = AuthViewModel::new(h.controller.clone());

        let err = block_on(vm.login("a@b.c", "pw")).unwrap_err();
        assert_eq!(err, ClientError::IncompleteAuthData);
        assert!(!h.controller.session().is_logged_in());
    }

    #[test]
    fn blank_fields_never_hit_the_backend() {
        let h = harness("/auth");
        let vm = AuthViewModel::new(h.controller.clone());

        assert!(block_on(vm.login(" ", "pw")).is_err());
        assert!(block_on(vm.register("", "a@b.c", "pw")).is_err());
        assert!(h.backend.calls().is_empty());
    }

    #[test]
    fn registration_switches_back_to_login() {
        let h = harness("/auth");
        let vm = AuthViewModel::new(h.controller.clone());
        vm.toggle_mode();
        assert_eq!(vm.state().mode, AuthMode::Register);

        block_on(vm.register("dave", "d@x.io", "pw")).unwrap();

        let state = vm.state();
        assert_eq!(state.mode, AuthMode::Login);
        assert_eq!(
            state.message.as_deref(),
            Some("Registration successful for dave! Please log in.")
        );
        // registering does not log in
        assert!(!h.controller.session().is_logged_in());
    }

    #[test]
    fn failed_registration_keeps_register_mode() {
        let h = harness("/auth");
        h.backend
            .set_register(Err(ClientError::http(400, "User already exists")));
        let vm = AuthViewModel::new(h.controller.clone());
        vm.set_mode(AuthMode::Register);

        assert!(block_on(vm.register("dave", "d@x.io", "pw")).is_err());
        assert_eq!(vm.state().mode, AuthMode::Register);
        assert_eq!(
            vm.state().message.as_deref(),
            Some("Registration failed: User already exists")
        );
    }
}
