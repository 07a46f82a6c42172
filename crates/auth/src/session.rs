//! Session and identity types issued by the external auth service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use simroam_core::UserId;

/// The auth service's proof of an active login.
///
/// Opaque to this crate beyond carrying the identity it was issued for; its
/// lifecycle (creation, refresh, revocation) is driven entirely by the
/// external service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: AuthenticatedUser,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

/// The stable identity behind a session.
///
/// The profile row is deliberately *not* embedded here: it is resolved
/// separately and can be absent for a freshly created identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
}

/// Kind of session-change notification delivered by the auth service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventKind {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// A session-change notification.
///
/// `session` is `None` exactly for [`SessionEventKind::SignedOut`]; a token
/// refresh carries the same identity as the session it refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub kind: SessionEventKind,
    pub session: Option<Session>,
}

impl SessionEvent {
    pub fn signed_in(session: Session) -> Self {
        Self {
            kind: SessionEventKind::SignedIn,
            session: Some(session),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            kind: SessionEventKind::SignedOut,
            session: None,
        }
    }

    pub fn token_refreshed(session: Session) -> Self {
        Self {
            kind: SessionEventKind::TokenRefreshed,
            session: Some(session),
        }
    }
}
