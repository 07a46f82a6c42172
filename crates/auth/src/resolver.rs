//! Session/identity resolver.
//!
//! Single source of truth for "who is signed in, with what profile and
//! roles". The resolver subscribes to the auth service's session-change
//! stream, joins each session with the profile row and role assignments for
//! its identity, and republishes the joined view through a `watch` channel.
//!
//! ## Ordering
//!
//! The initial `current_session()` bootstrap check and the session-change
//! stream can race at startup, and a fetch for identity A can still be in
//! flight when the service moves to identity B (or to signed-out). Every
//! profile/role fetch is therefore stamped with the session generation at
//! issue time; a completing fetch is applied only while the generation still
//! matches, otherwise it is discarded. The generation is bumped exactly when
//! the active identity changes, so a duplicate notification for the same
//! identity (token refresh included) never re-fetches or flickers the view.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use simroam_core::UserId;

use crate::error::{AuthError, ProfileWriteError};
use crate::gateway::{AuthGateway, DirectoryGateway, SignUpOutcome, SignUpRequest};
use crate::profile::{Profile, ProfileUpdate};
use crate::role::RoleSet;
use crate::session::{AuthenticatedUser, Session, SessionEvent};

// ─────────────────────────────────────────────────────────────────────────────
// Read model
// ─────────────────────────────────────────────────────────────────────────────

/// Coarse resolver state, derived from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// A session change (or the bootstrap check) is being resolved.
    Resolving,
    /// No active session.
    Anonymous,
    /// Active session with identity resolved; the profile may legitimately
    /// be absent and the role set may be empty.
    Authenticated,
}

/// The reactive `{user, profile, roles, loading}` view consumed by the UI
/// tree and the route guard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthSnapshot {
    pub user: Option<AuthenticatedUser>,
    pub profile: Option<Profile>,
    pub roles: RoleSet,
    pub loading: bool,
}

impl AuthSnapshot {
    fn booting() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    fn anonymous() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AuthState {
        if self.loading {
            AuthState::Resolving
        } else if self.user.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.roles.is_admin()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolver
// ─────────────────────────────────────────────────────────────────────────────

struct ResolverState {
    /// Bumped on every identity change; stamps in-flight fetches.
    generation: u64,
    session: Option<Session>,
    snapshot: AuthSnapshot,
}

/// Explicit resolver service owned by the application root.
///
/// Construct once, wrap in an [`Arc`], call [`SessionResolver::start`] to
/// establish the subscription, and hand [`SessionResolver::subscribe`]
/// receivers to consumers. All mutation happens through the subscription
/// handler and the operations below; everything else is read-only.
pub struct SessionResolver {
    auth: Arc<dyn AuthGateway>,
    directory: Arc<dyn DirectoryGateway>,
    // Held only for short synchronous sections, never across an await.
    state: Mutex<ResolverState>,
    tx: watch::Sender<AuthSnapshot>,
}

impl SessionResolver {
    pub fn new(auth: Arc<dyn AuthGateway>, directory: Arc<dyn DirectoryGateway>) -> Self {
        let snapshot = AuthSnapshot::booting();
        let (tx, _rx) = watch::channel(snapshot.clone());
        Self {
            auth,
            directory,
            state: Mutex::new(ResolverState {
                generation: 0,
                session: None,
                snapshot,
            }),
            tx,
        }
    }

    /// Current resolved view.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.lock().expect("resolver state poisoned").snapshot.clone()
    }

    /// Subscribe to snapshot changes. The receiver immediately holds the
    /// current value.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }

    /// Establish the session-change subscription and run the bootstrap
    /// current-session check.
    ///
    /// The subscription is opened *before* the bootstrap call so that no
    /// notification emitted in between is lost; notifications queued while
    /// the bootstrap result is applied are then replayed in arrival order,
    /// which keeps last-write-wins by event order.
    ///
    /// Aborting the returned handle tears the subscription down.
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let mut events = self.auth.subscribe_session_changes();
        let resolver = Arc::clone(self);
        tokio::spawn(async move {
            match resolver.auth.current_session().await {
                Ok(session) => resolver.apply_session(session),
                Err(e) => {
                    tracing::warn!(error = %e, "session bootstrap check failed");
                    resolver.apply_session(None);
                }
            }

            loop {
                match events.recv().await {
                    Ok(event) => resolver.apply_event(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Only the latest identity matters; resync from the
                        // service rather than replaying what was missed.
                        tracing::warn!(skipped, "session-change stream lagged");
                        match resolver.auth.current_session().await {
                            Ok(session) => resolver.apply_session(session),
                            Err(e) => {
                                tracing::warn!(error = %e, "resync after lag failed")
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session-change handling
    // ─────────────────────────────────────────────────────────────────────

    fn apply_event(self: &Arc<Self>, event: SessionEvent) {
        tracing::debug!(kind = ?event.kind, "session change received");
        self.apply_session(event.session);
    }

    /// Apply a session observation (from the stream or the bootstrap check).
    ///
    /// Synchronous: the state transition and snapshot publication happen
    /// before this returns, which is what makes sign-out clear profile/role
    /// data with no stale window. Profile/role resolution for a new identity
    /// is spawned and stamped with the new generation.
    fn apply_session(self: &Arc<Self>, session: Option<Session>) {
        let spawn_for = {
            let mut st = self.state.lock().expect("resolver state poisoned");

            match (&st.session, &session) {
                // Same identity (duplicate notification or token refresh):
                // keep the resolved profile/roles, just adopt the new token.
                (Some(current), Some(new)) if current.user_id() == new.user_id() => {
                    st.session = session;
                    return;
                }
                // Already anonymous and settled: nothing to do.
                (None, None) if !st.snapshot.loading => return,
                _ => {}
            }

            st.generation += 1;
            st.session = session.clone();

            match session {
                Some(session) => {
                    let user = session.user.clone();
                    st.snapshot = AuthSnapshot {
                        user: Some(user.clone()),
                        profile: None,
                        roles: RoleSet::empty(),
                        loading: true,
                    };
                    self.tx.send_replace(st.snapshot.clone());
                    Some((st.generation, user))
                }
                None => {
                    st.snapshot = AuthSnapshot::anonymous();
                    self.tx.send_replace(st.snapshot.clone());
                    None
                }
            }
        };

        if let Some((generation, user)) = spawn_for {
            let resolver = Arc::clone(self);
            tokio::spawn(async move {
                resolver.resolve_identity(generation, user).await;
            });
        }
    }

    /// Fetch profile + roles for `user` and apply them if the resolver is
    /// still on the generation the fetch was issued for.
    ///
    /// Both fetches are best-effort: a failure degrades to an absent profile
    /// or empty role set rather than blocking the Authenticated transition.
    async fn resolve_identity(&self, generation: u64, user: AuthenticatedUser) {
        let profile = match self.directory.profile_by_user(user.id).await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "profile fetch failed");
                None
            }
        };

        let roles = match self.directory.role_assignments(user.id).await {
            Ok(roles) => roles.into_iter().collect(),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "role fetch failed");
                RoleSet::empty()
            }
        };

        let mut st = self.state.lock().expect("resolver state poisoned");
        if st.generation != generation {
            tracing::debug!(
                user_id = %user.id,
                stale = generation,
                current = st.generation,
                "discarding superseded identity resolution"
            );
            return;
        }

        st.snapshot = AuthSnapshot {
            user: Some(user),
            profile,
            roles,
            loading: false,
        };
        self.tx.send_replace(st.snapshot.clone());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Create a credential and identity with the auth service.
    ///
    /// On success the service's session-change notification drives the same
    /// resolution path as sign-in. Service rejections (duplicate e-mail, weak
    /// password) propagate unmodified; no retry, no partial state transition.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpOutcome, AuthError> {
        self.auth.sign_up(request).await
    }

    /// Authenticate with the auth service.
    ///
    /// Resolution happens via the session-change subscription; invalid
    /// credentials propagate to the caller for the form to present.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.auth.sign_in(email, password).await
    }

    /// End the active session.
    ///
    /// The subscription transitions the resolver to Anonymous; profile and
    /// roles are cleared synchronously with the session clearing.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.auth.sign_out().await
    }

    /// Write the given fields to the current identity's profile row, then
    /// re-read the full row so the held profile stays backend-authoritative.
    ///
    /// Fails with [`ProfileWriteError::NotAuthenticated`] when no session is
    /// active — reaching that from UI code means a route-gating bug.
    pub async fn update_profile(&self, updates: ProfileUpdate) -> Result<Profile, ProfileWriteError> {
        let user_id = self
            .current_user_id()
            .ok_or(ProfileWriteError::NotAuthenticated)?;

        let row = self.directory.update_profile(user_id, updates).await?;
        self.refresh_profile().await;
        Ok(row)
    }

    /// Re-fetch the profile row for the current identity and replace the held
    /// copy. No-op without an active session.
    ///
    /// A refresh failure is logged and swallowed; the previously held profile
    /// is kept (stale-but-present beats absent).
    pub async fn refresh_profile(&self) {
        let (user_id, generation) = {
            let st = self.state.lock().expect("resolver state poisoned");
            match &st.session {
                Some(session) => (session.user_id(), st.generation),
                None => return,
            }
        };

        match self.directory.profile_by_user(user_id).await {
            Ok(profile) => {
                let mut st = self.state.lock().expect("resolver state poisoned");
                if st.generation != generation {
                    return;
                }
                st.snapshot.profile = profile;
                self.tx.send_replace(st.snapshot.clone());
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "profile refresh failed");
            }
        }
    }

    fn current_user_id(&self) -> Option<UserId> {
        self.state
            .lock()
            .expect("resolver state poisoned")
            .session
            .as_ref()
            .map(|s| s.user_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(),
            email: email.to_string(),
        }
    }

    #[test]
    fn booting_snapshot_is_resolving() {
        assert_eq!(AuthSnapshot::booting().state(), AuthState::Resolving);
    }

    #[test]
    fn settled_snapshot_without_user_is_anonymous() {
        assert_eq!(AuthSnapshot::anonymous().state(), AuthState::Anonymous);
    }

    #[test]
    fn authenticated_without_admin_role_is_not_admin() {
        let snapshot = AuthSnapshot {
            user: Some(user("amina@example.com")),
            profile: None,
            roles: RoleSet::empty(),
            loading: false,
        };
        assert_eq!(snapshot.state(), AuthState::Authenticated);
        assert!(!snapshot.is_admin());
    }

    #[test]
    fn resolving_user_is_not_yet_authenticated() {
        let snapshot = AuthSnapshot {
            user: Some(user("amina@example.com")),
            profile: None,
            roles: RoleSet::empty(),
            loading: true,
        };
        assert_eq!(snapshot.state(), AuthState::Resolving);
        assert!(!snapshot.is_authenticated());
    }
}
