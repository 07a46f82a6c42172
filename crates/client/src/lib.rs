//! `simroam-client` — HTTP client for the hosted backend-as-a-service.
//!
//! Implements the gateway traits from `simroam-auth` against the backend's
//! auth (`/auth/v1`), row (`/rest/v1`) and storage (`/storage/v1`) surfaces,
//! and exposes the read-only listing calls the catalog/billing/admin views
//! consume.

pub mod config;
pub mod platform;
pub mod wire;

pub use config::ClientConfig;
pub use platform::{PlatformClient, UserRoleRow};
