//! `simroam-auth` — session/identity resolution for the customer platform.
//!
//! This crate owns the authenticated session lifecycle: it joins the auth
//! service's session with the user's profile row and role assignments, and
//! republishes a consistent `{user, profile, roles, loading}` view whenever
//! any of them change. It is intentionally decoupled from HTTP and storage;
//! the hosted backend is reached through the gateway traits in [`gateway`].

pub mod error;
pub mod gateway;
pub mod guard;
pub mod profile;
pub mod resolver;
pub mod role;
pub mod session;

pub use error::{AuthError, GatewayError, ProfileWriteError};
pub use gateway::{AuthGateway, DirectoryGateway, SignUpOutcome, SignUpRequest, StorageRef};
pub use guard::{evaluate_route, RouteAccess, RouteDecision};
pub use profile::{Profile, ProfileUpdate};
pub use resolver::{AuthSnapshot, AuthState, SessionResolver};
pub use role::{Role, RoleSet};
pub use session::{AuthenticatedUser, Session, SessionEvent, SessionEventKind};
