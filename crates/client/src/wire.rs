//! Wire DTOs for the backend's auth surface.
//!
//! Row endpoints deserialize straight into the domain row types; only the
//! auth service needs dedicated shapes (its session payload and error body
//! formats are service-specific).

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use simroam_auth::{AuthError, AuthenticatedUser, Session};
use simroam_core::UserId;

/// The auth service's user object.
#[derive(Debug, Clone, Deserialize)]
pub struct WireUser {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<WireUser> for AuthenticatedUser {
    fn from(user: WireUser) -> Self {
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
        }
    }
}

/// Token-grant response (sign-in, refresh) and sign-up-with-session payload.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime in seconds from issuance.
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: WireUser,
}

impl WireSession {
    pub fn into_session(self, issued_at: DateTime<Utc>) -> Session {
        Session {
            user: self.user.into(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_in.map(|secs| issued_at + Duration::seconds(secs)),
        }
    }
}

/// Sign-up response: a full session when auto-confirm is on, otherwise just
/// the created user (e-mail confirmation pending).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireSignUp {
    WithSession(WireSession),
    UserOnly(WireUser),
}

/// Error body variants the auth service emits.
///
/// Older endpoints use `{error, error_description}`, newer ones
/// `{error_code, msg}`; row endpoints use `{code, message}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl WireErrorBody {
    /// Map a raw error body to the verbatim `AuthError` shown to the caller.
    pub fn into_auth_error(self, status: u16, raw: &str) -> AuthError {
        let code = self.error_code.or(self.code).or(self.error);
        let message = self
            .msg
            .or(self.message)
            .or(self.error_description)
            .unwrap_or_else(|| format!("auth request failed with status {status}: {raw}"));
        AuthError { code, message }
    }
}
