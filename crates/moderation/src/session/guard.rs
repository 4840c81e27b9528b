//! Route guard
//!
//! Stateless: every navigation attempt is checked against the session as it
//! is right now, so a logout is visible to the very next check.

use super::Session;

/// Destinations reachable from the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Login entry point
    Login,
    /// Email list with per-item analysis
    Emails,
    /// Operator dashboard
    Dashboard,
}

impl Route {
    /// Routes that require an active session
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Emails | Route::Dashboard)
    }

    /// Path form, for display and parsing
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Emails => "/email",
            Route::Dashboard => "/dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" | "/login" => Some(Route::Login),
            "/email" | "/emails" => Some(Route::Emails),
            "/dashboard" => Some(Route::Dashboard),
            _ => None,
        }
    }
}

/// Outcome of a navigation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested route
    Render(Route),
    /// Go somewhere else instead
    Redirect(Route),
}

impl Navigation {
    /// The route that ends up on screen
    pub fn destination(self) -> Route {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => route,
        }
    }
}

/// Whether protected views may be shown for this session
pub fn can_enter(session: &Session) -> bool {
    session.is_active()
}

/// Decide where a navigation attempt to `target` lands.
///
/// Protected routes redirect to the login entry point without a session.
/// The login page itself redirects to the email list when a session is
/// already active.
pub fn navigate(session: &Session, target: Route) -> Navigation {
    let active = can_enter(session);
    match target {
        Route::Login if active => Navigation::Redirect(Route::Emails),
        route if route.is_protected() && !active => Navigation::Redirect(Route::Login),
        route => Navigation::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Session {
        Session::LoggedIn("user@example.com".to_string())
    }

    #[test]
    fn test_can_enter() {
        assert!(!can_enter(&Session::LoggedOut));
        assert!(can_enter(&logged_in()));
    }

    #[test]
    fn test_protected_routes_redirect_when_logged_out() {
        let session = Session::LoggedOut;
        assert_eq!(navigate(&session, Route::Emails), Navigation::Redirect(Route::Login));
        assert_eq!(navigate(&session, Route::Dashboard), Navigation::Redirect(Route::Login));
        assert_eq!(navigate(&session, Route::Login), Navigation::Render(Route::Login));
    }

    #[test]
    fn test_logged_in_navigation() {
        let session = logged_in();
        assert_eq!(navigate(&session, Route::Emails), Navigation::Render(Route::Emails));
        assert_eq!(navigate(&session, Route::Dashboard), Navigation::Render(Route::Dashboard));
        assert_eq!(navigate(&session, Route::Login), Navigation::Redirect(Route::Emails));
    }

    #[test]
    fn test_route_paths() {
        for route in [Route::Login, Route::Emails, Route::Dashboard] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/settings"), None);
    }
}
