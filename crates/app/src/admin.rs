//! Admin dashboard view models: user/role/transaction listing.
//!
//! Admin access is decided by the `user_roles` table, resolved through the
//! session resolver. The backend additionally enforces row-level access on
//! the listing endpoints; this layer is the route-level gate.

use std::collections::HashMap;

use thiserror::Error;

use simroam_auth::{AuthSnapshot, Profile};
use simroam_billing::Purchase;
use simroam_client::UserRoleRow;
use simroam_core::UserId;

/// Raised when a non-admin reaches the admin surface; the router should have
/// redirected before this is ever constructed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("admin role required")]
pub struct AdminAccessDenied;

/// One row of the admin user table: profile joined with its role labels.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUserRow {
    pub profile: Profile,
    pub roles: Vec<String>,
}

impl AdminUserRow {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == "admin")
    }
}

/// The admin dashboard's listing data.
#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    pub users: Vec<AdminUserRow>,
    pub purchases: Vec<Purchase>,
}

impl AdminDashboard {
    /// Join the fetched rows, refusing to build for a non-admin viewer.
    pub fn build(
        viewer: &AuthSnapshot,
        profiles: Vec<Profile>,
        role_rows: Vec<UserRoleRow>,
        purchases: Vec<Purchase>,
    ) -> Result<Self, AdminAccessDenied> {
        if !viewer.is_admin() {
            return Err(AdminAccessDenied);
        }

        let mut roles_by_user: HashMap<UserId, Vec<String>> = HashMap::new();
        for row in role_rows {
            roles_by_user.entry(row.user_id).or_default().push(row.role);
        }

        let users = profiles
            .into_iter()
            .map(|profile| {
                let roles = roles_by_user
                    .remove(&profile.user_id)
                    .unwrap_or_default();
                AdminUserRow { profile, roles }
            })
            .collect();

        Ok(Self { users, purchases })
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn admin_count(&self) -> usize {
        self.users.iter().filter(|u| u.is_admin()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simroam_auth::{AuthenticatedUser, Role, RoleSet};
    use simroam_core::ProfileId;

    fn viewer(roles: RoleSet) -> AuthSnapshot {
        AuthSnapshot {
            user: Some(AuthenticatedUser {
                id: UserId::new(),
                email: "ops@example.com".to_string(),
            }),
            profile: None,
            roles,
            loading: false,
        }
    }

    fn profile(user_id: UserId, name: &str) -> Profile {
        Profile {
            id: ProfileId::new(),
            user_id,
            full_name: Some(name.to_string()),
            kyc_status: None,
            service_number: None,
            wallet_balance: None,
            nationality: None,
            id_number: None,
            phone_number: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn non_admin_viewer_is_refused() {
        let viewer = viewer([Role::user()].into_iter().collect());
        let result = AdminDashboard::build(&viewer, vec![], vec![], vec![]);
        assert_eq!(result.unwrap_err(), AdminAccessDenied);
    }

    #[test]
    fn roles_join_onto_profiles_by_user_id() {
        let admin_viewer = viewer([Role::admin()].into_iter().collect());
        let alice = UserId::new();
        let bob = UserId::new();

        let dashboard = AdminDashboard::build(
            &admin_viewer,
            vec![profile(alice, "Alice"), profile(bob, "Bob")],
            vec![
                UserRoleRow {
                    user_id: alice,
                    role: "admin".to_string(),
                },
                UserRoleRow {
                    user_id: alice,
                    role: "user".to_string(),
                },
            ],
            vec![],
        )
        .unwrap();

        assert_eq!(dashboard.user_count(), 2);
        assert_eq!(dashboard.admin_count(), 1);
        let alice_row = dashboard
            .users
            .iter()
            .find(|u| u.profile.user_id == alice)
            .unwrap();
        assert_eq!(alice_row.roles.len(), 2);

        // Missing role rows mean a plain user, never a default admin.
        let bob_row = dashboard
            .users
            .iter()
            .find(|u| u.profile.user_id == bob)
            .unwrap();
        assert!(bob_row.roles.is_empty());
        assert!(!bob_row.is_admin());
    }
}
