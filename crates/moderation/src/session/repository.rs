//! Valid credential pairs

use crate::models::Credential;

/// Source of truth for which credential pairs may log in
pub trait CredentialRepository: Send + Sync {
    /// True if the exact email/password pair is known
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// Fixed list of credentials, typically loaded from settings
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialRepository {
    users: Vec<Credential>,
}

impl StaticCredentialRepository {
    pub fn new(users: Vec<Credential>) -> Self {
        Self { users }
    }
}

impl CredentialRepository for StaticCredentialRepository {
    fn verify(&self, email: &str, password: &str) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && u.password == password)
    }
}
