//! `simroam-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no backend or transport
//! concerns): strongly-typed identifiers, the shared error model, money, and
//! the KYC status value object.

pub mod error;
pub mod id;
pub mod kyc;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{CountryId, ProductId, ProfileId, PurchaseId, UserId};
pub use kyc::KycStatus;
pub use money::{Currency, Money};
