//! Purchase rows (eSIM activations) and the request builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use simroam_core::{DomainError, ProductId, PurchaseId, UserId};

/// Lifecycle of a purchased eSIM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Active,
    Expired,
    Cancelled,
}

/// A purchase row: one eSIM bought by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub status: Option<PurchaseStatus>,
    /// QR payload for device provisioning; set once the backend activates.
    pub qr_code: Option<String>,
    /// Manual activation code fallback for devices that cannot scan.
    pub manual_code: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Purchase {
    /// Usable right now: activated and not past its expiry.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        if self.status != Some(PurchaseStatus::Active) {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => expires_at > now,
            None => true,
        }
    }
}

/// Validated insert payload for a new purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseRequest {
    pub user_id: UserId,
    pub product_id: ProductId,
}

impl PurchaseRequest {
    /// Build an insert payload; the price check guards against a product row
    /// that was mispriced or free-by-accident reaching checkout.
    pub fn new(user_id: UserId, product_id: ProductId, price_minor: i64) -> Result<Self, DomainError> {
        if price_minor <= 0 {
            return Err(DomainError::validation("purchase price must be positive"));
        }
        Ok(Self {
            user_id,
            product_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn purchase(status: PurchaseStatus, expires_in: Option<Duration>) -> Purchase {
        let now = Utc::now();
        Purchase {
            id: PurchaseId::new(),
            user_id: UserId::new(),
            product_id: ProductId::new(),
            status: Some(status),
            qr_code: None,
            manual_code: None,
            created_at: Some(now),
            expires_at: expires_in.map(|d| now + d),
        }
    }

    #[test]
    fn active_unexpired_purchase_is_usable() {
        let p = purchase(PurchaseStatus::Active, Some(Duration::days(7)));
        assert!(p.is_usable(Utc::now()));
    }

    #[test]
    fn expired_or_pending_purchases_are_not_usable() {
        let now = Utc::now();
        assert!(!purchase(PurchaseStatus::Active, Some(Duration::days(-1))).is_usable(now));
        assert!(!purchase(PurchaseStatus::Pending, Some(Duration::days(7))).is_usable(now));
        assert!(!purchase(PurchaseStatus::Cancelled, None).is_usable(now));
    }

    #[test]
    fn zero_priced_checkout_is_rejected() {
        let result = PurchaseRequest::new(UserId::new(), ProductId::new(), 0);
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(PurchaseRequest::new(UserId::new(), ProductId::new(), 500).is_ok());
    }
}
