//! Gateway traits for the hosted backend-as-a-service.
//!
//! Wire formats are owned by the backend's client implementation
//! (`simroam-client`); the resolver only depends on these seams, which keeps
//! it testable against in-memory fakes.

use async_trait::async_trait;
use tokio::sync::broadcast;

use simroam_core::UserId;

use crate::error::{AuthError, GatewayError};
use crate::profile::{Profile, ProfileUpdate};
use crate::role::Role;
use crate::session::{AuthenticatedUser, Session, SessionEvent};

/// Sign-up request: credentials plus the initial profile seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: Option<String>,
}

/// Raw result of a sign-up call.
///
/// The service may defer session issuance (e.g. e-mail confirmation flows),
/// so the session is optional even on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user: AuthenticatedUser,
    pub session: Option<Session>,
}

/// Reference to an uploaded object in backend file storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRef {
    pub bucket: String,
    pub path: String,
}

/// Session-establishing operations of the external auth service.
///
/// Failures of these calls are NOT best-effort: they propagate to the caller
/// and no state transition happens until the service emits a session change.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// One-shot current-session check used at resolver bootstrap.
    async fn current_session(&self) -> Result<Option<Session>, GatewayError>;

    /// Subscribe to the service's asynchronous session-change notifications
    /// (sign-in, sign-out, token refresh, external revocation).
    fn subscribe_session_changes(&self) -> broadcast::Receiver<SessionEvent>;

    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Row and file storage operations keyed by user id.
///
/// Profile-not-found is not an error: a freshly created auth identity may
/// transiently have no profile row.
#[async_trait]
pub trait DirectoryGateway: Send + Sync {
    async fn profile_by_user(&self, user_id: UserId) -> Result<Option<Profile>, GatewayError>;

    async fn update_profile(
        &self,
        user_id: UserId,
        updates: ProfileUpdate,
    ) -> Result<Profile, GatewayError>;

    async fn role_assignments(&self, user_id: UserId) -> Result<Vec<Role>, GatewayError>;

    async fn upload_document(
        &self,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<StorageRef, GatewayError>;
}
