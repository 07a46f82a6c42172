//! Route table and path resolution.

use simroam_auth::RouteAccess;

/// Dashboard sub-pages (rendered inside the dashboard layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPage {
    Home,
    Profile,
    BuyAirtime,
    Transactions,
    Support,
}

/// Every page the application can render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    OurEsims,
    About,
    Help,
    Magazine,
    /// Country detail page, carrying the ISO code from the path.
    CountryDetails(String),
    SignIn,
    Register,
    ForgotPassword,
    Contact,
    Dashboard(DashboardPage),
    Admin,
    NotFound,
}

impl Route {
    /// Access level this route declares to the guard.
    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Dashboard(_) => RouteAccess::Authenticated,
            Route::Admin => RouteAccess::Admin,
            _ => RouteAccess::Public,
        }
    }

    /// Resolve a location path to a route. Unknown paths get the catch-all
    /// not-found page (public).
    pub fn resolve(path: &str) -> Route {
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        match path {
            "/" => Route::Home,
            "/our-esims" => Route::OurEsims,
            "/about" => Route::About,
            "/help" => Route::Help,
            "/magazine" => Route::Magazine,
            "/auth" => Route::SignIn,
            "/register" => Route::Register,
            "/forgot-password" => Route::ForgotPassword,
            "/contact" => Route::Contact,
            "/admin" => Route::Admin,
            "/dashboard" => Route::Dashboard(DashboardPage::Home),
            "/dashboard/profile" => Route::Dashboard(DashboardPage::Profile),
            "/dashboard/buy-airtime" => Route::Dashboard(DashboardPage::BuyAirtime),
            "/dashboard/transactions" => Route::Dashboard(DashboardPage::Transactions),
            "/dashboard/support" => Route::Dashboard(DashboardPage::Support),
            _ => match path.strip_prefix("/country/") {
                Some(code) if !code.is_empty() && !code.contains('/') => {
                    Route::CountryDetails(code.to_ascii_uppercase())
                }
                _ => Route::NotFound,
            },
        }
    }
}
