//! Application root: owns the resolver and evaluates route gating.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use simroam_auth::{
    evaluate_route, AuthGateway, AuthSnapshot, DirectoryGateway, RouteDecision, SessionResolver,
};

use crate::routes::Route;

/// Application state shared by every page.
///
/// Owns the single resolver instance; pages read the snapshot (or hold a
/// watch receiver) and never mutate auth state directly.
#[derive(Clone)]
pub struct App {
    pub auth: Arc<dyn AuthGateway>,
    pub directory: Arc<dyn DirectoryGateway>,
    pub resolver: Arc<SessionResolver>,
}

impl App {
    pub fn new(auth: Arc<dyn AuthGateway>, directory: Arc<dyn DirectoryGateway>) -> Self {
        let resolver = Arc::new(SessionResolver::new(auth.clone(), directory.clone()));
        Self {
            auth,
            directory,
            resolver,
        }
    }

    /// Start session resolution. Abort the handle on application shutdown.
    pub fn start(&self) -> JoinHandle<()> {
        self.resolver.start()
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        self.resolver.snapshot()
    }

    /// Subscribe to resolved-state changes; the router re-runs its guard on
    /// every change, not only on navigation.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.resolver.subscribe()
    }

    /// Gate a route against the current resolved state.
    pub fn guard(&self, route: &Route) -> RouteDecision {
        evaluate_route(route.access(), &self.snapshot())
    }

    /// Resolve a path and gate it in one step (what a navigation does).
    pub fn navigate(&self, path: &str) -> (Route, RouteDecision) {
        let route = Route::resolve(path);
        let decision = self.guard(&route);
        (route, decision)
    }
}
