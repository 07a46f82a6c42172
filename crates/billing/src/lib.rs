//! `simroam-billing` — purchases, transaction history and wallet views.

pub mod purchase;
pub mod transaction;

pub use purchase::{Purchase, PurchaseRequest, PurchaseStatus};
pub use transaction::{
    Transaction, TransactionHistory, TransactionKind, TransactionStatus,
};
