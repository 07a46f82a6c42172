//! `simroam-app` — application root for the customer platform.
//!
//! Wires the session resolver to the route table and builds the headless
//! page view models the rendering layer consumes. The UI component library
//! itself is out of scope; everything here is renderer-agnostic.

pub mod admin;
pub mod app;
pub mod pages;
pub mod routes;

pub use admin::{AdminAccessDenied, AdminDashboard, AdminUserRow};
pub use app::App;
pub use pages::{kyc_document_path, BuyAirtimePage, DashboardHome, ProfileForm, TransactionsPage};
pub use routes::{DashboardPage, Route};
