//! Credential store trait and implementations
//!
//! The session layer persists a handful of string flags between runs.
//! The trait lets tests use the in-memory store while the app writes
//! through to a JSON file in the config directory.

mod file;
mod memory;
mod traits;

pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use traits::CredentialStore;

/// Keys written by the session manager
pub mod keys {
    pub const REMEMBERED_EMAIL: &str = "rememberedEmail";
    pub const REMEMBERED_PASSWORD: &str = "rememberedPassword";
    pub const REMEMBER_ME: &str = "rememberMe";
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
    pub const USER_EMAIL: &str = "userEmail";
}
