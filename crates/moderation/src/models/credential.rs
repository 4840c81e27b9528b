//! Login credential model

use serde::{Deserialize, Serialize};

/// An email/password pair.
///
/// Stored and compared exactly as given. Two credentials are equal only
/// when both fields match byte for byte.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// True if either field is empty
    pub fn is_incomplete(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}

// Keep passwords out of logs and panic messages
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_equality() {
        let a = Credential::new("user@example.com", "password123");
        assert_eq!(a, Credential::new("user@example.com", "password123"));
        assert_ne!(a, Credential::new("User@example.com", "password123"));
        assert_ne!(a, Credential::new("user@example.com", "password123 "));
    }

    #[test]
    fn test_incomplete() {
        assert!(Credential::new("", "x").is_incomplete());
        assert!(Credential::new("a@b.c", "").is_incomplete());
        assert!(!Credential::new("a@b.c", "x").is_incomplete());
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", Credential::new("a@b.c", "secret"));
        assert!(debug.contains("a@b.c"));
        assert!(!debug.contains("secret"));
    }
}
