//! KYC ("know your customer") verification status.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Verification status tracked per profile.
///
/// `Unset` is the state of a freshly created profile that has never submitted
/// documents; the backend stores it as a NULL/absent column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    #[default]
    Unset,
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    pub fn is_verified(&self) -> bool {
        matches!(self, KycStatus::Verified)
    }

    /// Whether the user may submit (or resubmit) KYC documents.
    pub fn can_submit_documents(&self) -> bool {
        matches!(self, KycStatus::Unset | KycStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Unset => "unset",
            KycStatus::Pending => "pending",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }
}

impl core::fmt::Display for KycStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KycStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unset" => Ok(KycStatus::Unset),
            "pending" => Ok(KycStatus::Pending),
            "verified" => Ok(KycStatus::Verified),
            "rejected" => Ok(KycStatus::Rejected),
            other => Err(DomainError::validation(format!(
                "unknown kyc status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        assert_eq!(KycStatus::default(), KycStatus::Unset);
        assert!(!KycStatus::default().is_verified());
    }

    #[test]
    fn resubmission_only_after_rejection_or_never_submitted() {
        assert!(KycStatus::Unset.can_submit_documents());
        assert!(KycStatus::Rejected.can_submit_documents());
        assert!(!KycStatus::Pending.can_submit_documents());
        assert!(!KycStatus::Verified.can_submit_documents());
    }
}
