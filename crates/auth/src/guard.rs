//! Route gating: the pure predicate the router applies to the resolved view.

use serde::{Deserialize, Serialize};

use crate::resolver::AuthSnapshot;

/// Access level a page/route declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    Public,
    Authenticated,
    Admin,
}

/// What the router must do for a route given the current snapshot.
///
/// The router re-evaluates on every snapshot change (not just on mount): a
/// session can be externally invalidated at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the route.
    Allow,
    /// Resolution in flight; render a neutral loading indicator, never the
    /// gated content.
    Loading,
    /// No active session for a gated route.
    RedirectToSignIn,
    /// Authenticated but lacking the `admin` role for an admin route.
    RedirectToDashboard,
}

/// Decide whether a route with the given access level may render.
pub fn evaluate_route(access: RouteAccess, snapshot: &AuthSnapshot) -> RouteDecision {
    if access == RouteAccess::Public {
        return RouteDecision::Allow;
    }
    if snapshot.loading {
        return RouteDecision::Loading;
    }
    if snapshot.user.is_none() {
        return RouteDecision::RedirectToSignIn;
    }
    if access == RouteAccess::Admin && !snapshot.roles.is_admin() {
        return RouteDecision::RedirectToDashboard;
    }
    RouteDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::{Role, RoleSet};
    use crate::session::AuthenticatedUser;
    use simroam_core::UserId;

    fn authenticated(roles: RoleSet) -> AuthSnapshot {
        AuthSnapshot {
            user: Some(AuthenticatedUser {
                id: UserId::new(),
                email: "amina@example.com".to_string(),
            }),
            profile: None,
            roles,
            loading: false,
        }
    }

    fn anonymous() -> AuthSnapshot {
        AuthSnapshot::default()
    }

    fn resolving() -> AuthSnapshot {
        AuthSnapshot {
            loading: true,
            ..AuthSnapshot::default()
        }
    }

    #[test]
    fn public_routes_always_render() {
        assert_eq!(
            evaluate_route(RouteAccess::Public, &resolving()),
            RouteDecision::Allow
        );
        assert_eq!(
            evaluate_route(RouteAccess::Public, &anonymous()),
            RouteDecision::Allow
        );
    }

    #[test]
    fn gated_routes_block_while_resolving() {
        assert_eq!(
            evaluate_route(RouteAccess::Authenticated, &resolving()),
            RouteDecision::Loading
        );
        assert_eq!(
            evaluate_route(RouteAccess::Admin, &resolving()),
            RouteDecision::Loading
        );
    }

    #[test]
    fn anonymous_is_redirected_to_sign_in() {
        assert_eq!(
            evaluate_route(RouteAccess::Authenticated, &anonymous()),
            RouteDecision::RedirectToSignIn
        );
        assert_eq!(
            evaluate_route(RouteAccess::Admin, &anonymous()),
            RouteDecision::RedirectToSignIn
        );
    }

    #[test]
    fn admin_route_requires_admin_role() {
        let plain: RoleSet = [Role::user()].into_iter().collect();
        assert_eq!(
            evaluate_route(RouteAccess::Admin, &authenticated(plain)),
            RouteDecision::RedirectToDashboard
        );

        let elevated: RoleSet = [Role::user(), Role::admin()].into_iter().collect();
        assert_eq!(
            evaluate_route(RouteAccess::Admin, &authenticated(elevated)),
            RouteDecision::Allow
        );
    }

    #[test]
    fn empty_role_set_never_grants_admin() {
        assert_eq!(
            evaluate_route(RouteAccess::Admin, &authenticated(RoleSet::empty())),
            RouteDecision::RedirectToDashboard
        );
        assert_eq!(
            evaluate_route(RouteAccess::Authenticated, &authenticated(RoleSet::empty())),
            RouteDecision::Allow
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_snapshot() -> impl Strategy<Value = AuthSnapshot> {
            (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(has_user, has_admin, loading)| AuthSnapshot {
                    user: has_user.then(|| AuthenticatedUser {
                        id: UserId::new(),
                        email: "p@example.com".to_string(),
                    }),
                    profile: None,
                    roles: if has_admin {
                        [Role::admin()].into_iter().collect()
                    } else {
                        RoleSet::empty()
                    },
                    loading,
                },
            )
        }

        proptest! {
            /// Public routes render regardless of the resolved state.
            #[test]
            fn public_is_unconditional(snapshot in arb_snapshot()) {
                prop_assert_eq!(
                    evaluate_route(RouteAccess::Public, &snapshot),
                    RouteDecision::Allow
                );
            }

            /// A gated route never renders without a settled, signed-in user.
            #[test]
            fn gated_never_renders_for_anonymous(snapshot in arb_snapshot()) {
                if snapshot.loading || snapshot.user.is_none() {
                    for access in [RouteAccess::Authenticated, RouteAccess::Admin] {
                        prop_assert_ne!(
                            evaluate_route(access, &snapshot),
                            RouteDecision::Allow
                        );
                    }
                }
            }
        }
    }
}
