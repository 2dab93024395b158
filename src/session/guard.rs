use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Dashboard,
    Schools,
    Coaches,
    Athletes,
    Groups,
    Events,
    Attendance,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Dashboard,
        Route::Schools,
        Route::Coaches,
        Route::Athletes,
        Route::Groups,
        Route::Events,
        Route::Attendance,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Schools => "/schools",
            Route::Coaches => "/coaches",
            Route::Athletes => "/athletes",
            Route::Groups => "/groups",
            Route::Events => "/events",
            Route::Attendance => "/attendance",
        }
    }

    /// Map a location to a route; `/` and unknown paths land on the dashboard
    pub fn from_path(path: &str) -> Route {
        let path = path.trim_end_matches('/');
        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(Route::Dashboard)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(Route),
}

/// Signed-out users only see the login page; signed-in users never do
pub fn guard(route: Route, authenticated: bool) -> RouteDecision {
    match (route.is_public(), authenticated) {
        (false, false) => RouteDecision::Redirect(Route::Login),
        (true, true) => RouteDecision::Redirect(Route::Dashboard),
        _ => RouteDecision::Allow,
    }
}
