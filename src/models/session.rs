use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// SESSION - Authenticated identity + bearer token
// ============================================================================

/// User block of the login payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(default, alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Fields the client does not read, kept so the stored record matches the server's
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full body of `POST /api/auth/login`, persisted verbatim.
///
/// Every field is optional on the wire: the backend has been seen returning
/// a token without a user block, which must not produce a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A live session. Only built through [`Session::from_login`], so
/// `user.username` and `token` are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: SessionUser,
}

impl Session {
    /// Validate a login payload. `None` when the user block, the username
    /// or the token is missing.
    pub fn from_login(response: &LoginResponse) -> Option<Self> {
        let user = response.user.as_ref()?;
        if user.username.trim().is_empty() {
            return None;
        }
        let token = response.token.as_deref().filter(|t| !t.is_empty())?;
        Some(Self {
            token: token.to_string(),
            user: user.clone(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Generic `{ message }` body returned by register/delete and by errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
