use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::UserContext;
use crate::session::{guard, Route, RouteDecision};

/// Shown on the login form; deliberately the same for a wrong email and a wrong password
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password";

/// The one account allowed into the dashboard
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "admin@sportsorg.com".to_string(),
            password: "admin123".to_string(),
            display_name: "Admin User".to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Authenticated flag plus the signed-in user
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    credentials: Credentials,
    user: Option<UserContext>,
}

impl SessionGate {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            user: None,
        }
    }

    /// True iff both values match the configured pair. A failed attempt
    /// leaves the current session as it was.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        if email != self.credentials.email || password != self.credentials.password {
            warn!("login rejected");
            return false;
        }

        let user = UserContext::signed_in(
            self.credentials.email.clone(),
            self.credentials.display_name.clone(),
        );
        info!("{} signed in (session {})", user.email, user.session_id);
        self.user = Some(user);
        true
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("{} signed out (session {})", user.email, user.session_id);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&UserContext> {
        self.user.as_ref()
    }

    /// Route decision for the current session
    pub fn guard(&self, route: Route) -> RouteDecision {
        guard(route, self.is_authenticated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_login() {
        let mut gate = SessionGate::default();
        assert!(!gate.login("wrong@x.com", "bad"));
        assert!(!gate.is_authenticated());
        assert!(gate.current_user().is_none());
    }

    #[test]
    fn test_right_email_wrong_password() {
        let mut gate = SessionGate::default();
        assert!(!gate.login("admin@sportsorg.com", "nope"));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_login_then_logout() {
        let mut gate = SessionGate::new(Credentials {
            email: "coach@club.org".to_string(),
            password: "s3cret".to_string(),
            display_name: "Head Coach".to_string(),
        });

        assert!(gate.login("coach@club.org", "s3cret"));
        assert!(gate.is_authenticated());
        let user = gate.current_user().unwrap();
        assert_eq!(user.name, "Head Coach");
        assert_eq!(user.email, "coach@club.org");

        gate.logout();
        assert!(!gate.is_authenticated());
        assert!(gate.current_user().is_none());
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let mut gate = SessionGate::default();
        assert!(gate.login("admin@sportsorg.com", "admin123"));
        let session = gate.current_user().unwrap().session_id;

        assert!(!gate.login("admin@sportsorg.com", "wrong"));
        assert_eq!(gate.current_user().map(|u| u.session_id), Some(session));
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let debug = format!("{:?}", Credentials::default());
        assert!(!debug.contains("admin123"));
        assert!(debug.contains("<redacted>"));
    }
}
