//! Error taxonomy for the auth boundary.

use thiserror::Error;

/// A credential/identity operation rejected by the external auth service
/// (bad password, duplicate account, policy violation).
///
/// Surfaced verbatim to the initiating caller; never retried automatically.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("auth service rejected the request: {message}")]
pub struct AuthError {
    /// Service-assigned error code, when the service provides one
    /// (e.g. `user_already_exists`, `invalid_credentials`).
    pub code: Option<String>,
    pub message: String,
}

impl AuthError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn is_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

/// Transport/decoding failure talking to the backend's row or storage
/// endpoints.
///
/// On the read side (profile/role fetch) these are best-effort: logged and
/// absorbed, never surfaced as UI errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode backend response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// Failure of a mutating profile operation.
///
/// `NotAuthenticated` is a programming-contract violation: it indicates a
/// route-gating bug if an end user ever reaches it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileWriteError {
    #[error("no authenticated session")]
    NotAuthenticated,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
