//! Headless view models for the dashboard pages.

use simroam_auth::{AuthSnapshot, ProfileUpdate};
use simroam_billing::TransactionHistory;
use simroam_catalog::{plans_for, AirtimePlan};
use simroam_core::{Currency, KycStatus, Money, UserId};

/// Dashboard landing card: greeting, verification badge, wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardHome {
    pub greeting_name: String,
    pub kyc: KycStatus,
    pub wallet_balance: Money,
    pub service_number: Option<String>,
}

impl DashboardHome {
    /// Build from the resolved state; `None` while not authenticated (the
    /// guard should have redirected already).
    pub fn build(snapshot: &AuthSnapshot) -> Option<Self> {
        if !snapshot.is_authenticated() {
            return None;
        }
        let user = snapshot.user.as_ref()?;
        let profile = snapshot.profile.as_ref();

        let greeting_name = profile
            .and_then(|p| p.full_name.clone())
            .unwrap_or_else(|| user.email.clone());

        Some(Self {
            greeting_name,
            kyc: profile.map(|p| p.kyc()).unwrap_or_default(),
            wallet_balance: Money::new(
                profile.and_then(|p| p.wallet_balance).unwrap_or(0),
                Currency::Kes,
            ),
            service_number: profile.and_then(|p| p.service_number.clone()),
        })
    }
}

/// Profile page form state: current values plus what may be edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileForm {
    pub full_name: String,
    pub id_number: String,
    pub nationality: String,
    pub phone_number: String,
    pub kyc: KycStatus,
    pub can_submit_documents: bool,
}

impl ProfileForm {
    pub fn build(snapshot: &AuthSnapshot) -> Option<Self> {
        if !snapshot.is_authenticated() {
            return None;
        }
        let profile = snapshot.profile.as_ref();
        let kyc = profile.map(|p| p.kyc()).unwrap_or_default();
        Some(Self {
            full_name: profile
                .and_then(|p| p.full_name.clone())
                .unwrap_or_default(),
            id_number: profile
                .and_then(|p| p.id_number.clone())
                .unwrap_or_default(),
            nationality: profile
                .and_then(|p| p.nationality.clone())
                .unwrap_or_default(),
            phone_number: profile
                .and_then(|p| p.phone_number.clone())
                .unwrap_or_default(),
            kyc,
            can_submit_documents: kyc.can_submit_documents(),
        })
    }

    /// Submission payload: only fields that changed relative to the form's
    /// initial values.
    pub fn changes(
        &self,
        full_name: &str,
        id_number: &str,
        nationality: &str,
        phone_number: &str,
    ) -> ProfileUpdate {
        let mut update = ProfileUpdate::default();
        if full_name != self.full_name {
            update = update.full_name(full_name);
        }
        if id_number != self.id_number {
            update = update.id_number(id_number);
        }
        if nationality != self.nationality {
            update = update.nationality(nationality);
        }
        if phone_number != self.phone_number {
            update = update.phone_number(phone_number);
        }
        update
    }
}

/// Storage path for an uploaded KYC document, namespaced per user.
pub fn kyc_document_path(user_id: UserId, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{user_id}/{safe}")
}

/// Airtime purchase page: country selection joined with the price table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyAirtimePage {
    pub country_code: String,
    pub plans: Vec<AirtimePlan>,
}

impl BuyAirtimePage {
    pub fn build(country_code: &str) -> Self {
        Self {
            country_code: country_code.to_ascii_uppercase(),
            plans: plans_for(country_code),
        }
    }

    pub fn has_coverage(&self) -> bool {
        !self.plans.is_empty()
    }
}

/// Transaction history page: rows plus the two headline totals.
#[derive(Debug, Clone)]
pub struct TransactionsPage {
    pub history: TransactionHistory,
    pub total_spent: Money,
    pub total_topups: Money,
}

impl TransactionsPage {
    /// Headline totals are reported in the account currency.
    pub fn build(history: TransactionHistory, account_currency: Currency) -> Self {
        let total_spent = history.total_spent(account_currency);
        let total_topups = history.total_topups(account_currency);
        Self {
            history,
            total_spent,
            total_topups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simroam_auth::{AuthenticatedUser, Profile, RoleSet};
    use simroam_core::ProfileId;

    fn authenticated_snapshot(profile: Option<Profile>) -> AuthSnapshot {
        AuthSnapshot {
            user: Some(AuthenticatedUser {
                id: UserId::new(),
                email: "amina@example.com".to_string(),
            }),
            profile,
            roles: RoleSet::empty(),
            loading: false,
        }
    }

    fn profile(full_name: Option<&str>) -> Profile {
        Profile {
            id: ProfileId::new(),
            user_id: UserId::new(),
            full_name: full_name.map(str::to_string),
            kyc_status: Some(KycStatus::Verified),
            service_number: Some("254700123456".to_string()),
            wallet_balance: Some(1_500),
            nationality: Some("Kenyan".to_string()),
            id_number: None,
            phone_number: Some("+254700123456".to_string()),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn dashboard_home_prefers_the_profile_name() {
        let home =
            DashboardHome::build(&authenticated_snapshot(Some(profile(Some("Amina"))))).unwrap();
        assert_eq!(home.greeting_name, "Amina");
        assert_eq!(home.kyc, KycStatus::Verified);
        assert_eq!(home.wallet_balance, Money::new(1_500, Currency::Kes));
    }

    #[test]
    fn dashboard_home_falls_back_to_the_email() {
        let home = DashboardHome::build(&authenticated_snapshot(None)).unwrap();
        assert_eq!(home.greeting_name, "amina@example.com");
        assert_eq!(home.kyc, KycStatus::Unset);
    }

    #[test]
    fn dashboard_home_is_absent_when_anonymous() {
        assert!(DashboardHome::build(&AuthSnapshot::default()).is_none());
    }

    #[test]
    fn profile_form_submits_only_changed_fields() {
        let form =
            ProfileForm::build(&authenticated_snapshot(Some(profile(Some("Amina"))))).unwrap();
        let update = form.changes("Amina A. Odhiambo", "", "Kenyan", "+254700123456");
        assert_eq!(update.full_name.as_deref(), Some("Amina A. Odhiambo"));
        assert!(update.nationality.is_none());
        assert!(update.phone_number.is_none());
    }

    #[test]
    fn verified_profiles_cannot_resubmit_documents() {
        let form =
            ProfileForm::build(&authenticated_snapshot(Some(profile(Some("Amina"))))).unwrap();
        assert!(!form.can_submit_documents);
    }

    #[test]
    fn kyc_paths_are_user_scoped_and_sanitized() {
        let user_id = UserId::new();
        let path = kyc_document_path(user_id, "national id (front).jpg");
        assert_eq!(path, format!("{user_id}/national_id__front_.jpg"));
    }

    #[test]
    fn airtime_page_reports_coverage() {
        assert!(BuyAirtimePage::build("ke").has_coverage());
        assert!(!BuyAirtimePage::build("ZA").has_coverage());
        assert_eq!(BuyAirtimePage::build("ke").country_code, "KE");
    }
}
