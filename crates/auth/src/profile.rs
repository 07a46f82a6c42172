//! Profile row and the constrained partial-update payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use simroam_core::{KycStatus, ProfileId, UserId};

/// The mutable business-data row associated 1:1 with an identity.
///
/// Owned by the backend store; the resolver holds a read-through cached copy
/// for the lifetime of the session. Columns mirror the hosted schema, so most
/// fields are nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub kyc_status: Option<KycStatus>,
    /// Service number issued on activation (the subscriber's roaming MSISDN).
    pub service_number: Option<String>,
    /// Wallet balance in minor units of the account currency.
    pub wallet_balance: Option<i64>,
    pub nationality: Option<String>,
    pub id_number: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Effective KYC status; an absent column means "never submitted".
    pub fn kyc(&self) -> KycStatus {
        self.kyc_status.unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("")
    }
}

/// Partial update of the mutable profile fields.
///
/// Exactly the fields a user may edit from the dashboard; anything else
/// (KYC status, wallet, service number) is backend-owned and unrepresentable
/// here. `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.id_number.is_none()
            && self.nationality.is_none()
            && self.phone_number.is_none()
    }

    pub fn full_name(mut self, name: impl Into<String>) -> Self {
        self.full_name = Some(name.into());
        self
    }

    pub fn id_number(mut self, id_number: impl Into<String>) -> Self {
        self.id_number = Some(id_number.into());
        self
    }

    pub fn nationality(mut self, nationality: impl Into<String>) -> Self {
        self.nationality = Some(nationality.into());
        self
    }

    pub fn phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }
}
