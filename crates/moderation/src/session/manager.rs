//! Login/logout state machine
//!
//! The manager is the only writer of the credential store. It keeps the
//! login form's state alongside the session so that remembered credentials
//! can be pre-filled and an inline error message shown.

use log::{debug, info, warn};
use std::sync::Arc;
use thiserror::Error;

use super::CredentialRepository;
use crate::models::Credential;
use crate::storage::{CredentialStore, keys};

/// Authenticated state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(String),
}

impl Session {
    pub fn is_active(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }

    /// Email of the active session
    pub fn email(&self) -> Option<&str> {
        match self {
            Session::LoggedIn(email) => Some(email),
            Session::LoggedOut => None,
        }
    }
}

/// Errors surfaced by [`SessionManager::login`]
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Failed to update session store: {0}")]
    Store(#[from] anyhow::Error),
}

/// Login form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    /// Inline error from the last submission
    pub error: Option<String>,
}

/// Owns the session and its persisted flags
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    users: Arc<dyn CredentialRepository>,
    session: Session,
    form: LoginForm,
}

impl SessionManager {
    /// Create a logged-out manager. Call [`restore`](Self::restore) to pick up
    /// persisted state.
    pub fn new(store: Arc<dyn CredentialStore>, users: Arc<dyn CredentialRepository>) -> Self {
        Self {
            store,
            users,
            session: Session::LoggedOut,
            form: LoginForm::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn set_remember_me(&mut self, remember: bool) {
        self.form.remember_me = remember;
    }

    /// Restore state persisted by a previous run.
    ///
    /// Remembered credentials pre-fill the form. A persisted session flag
    /// logs straight in with the stored email, no credentials needed.
    pub fn restore(&mut self) -> anyhow::Result<&Session> {
        let remembered = self.store.get_flag(keys::REMEMBER_ME)?;
        let saved_email = self.store.get(keys::REMEMBERED_EMAIL)?;
        let saved_password = self.store.get(keys::REMEMBERED_PASSWORD)?;

        if remembered {
            if let (Some(email), Some(password)) = (saved_email, saved_password) {
                debug!("Pre-filling login form for {}", email);
                self.form.email = email;
                self.form.password = password;
                self.form.remember_me = true;
            }
        }

        if self.store.get_flag(keys::IS_LOGGED_IN)? {
            match self.store.get(keys::USER_EMAIL)? {
                Some(email) if !email.is_empty() => {
                    info!("Restored session for {}", email);
                    self.session = Session::LoggedIn(email);
                }
                _ => {
                    warn!("Session flag set without a user email; clearing it");
                    self.store.set_flag(keys::IS_LOGGED_IN, false)?;
                }
            }
        }

        Ok(&self.session)
    }

    /// Attempt to log in with the given credentials.
    ///
    /// The form's remember preference decides whether the pair is persisted
    /// for next time. On failure the session is left untouched and the error
    /// message is also recorded on the form.
    pub fn login(&mut self, email: &str, password: &str) -> Result<&Session, LoginError> {
        self.form.email = email.to_string();
        self.form.password = password.to_string();
        self.form.error = None;

        match self.try_login(email, password) {
            Ok(()) => Ok(&self.session),
            Err(e) => {
                self.form.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Submit whatever is currently in the form
    pub fn submit(&mut self) -> Result<&Session, LoginError> {
        let email = self.form.email.clone();
        let password = self.form.password.clone();
        self.login(&email, &password)
    }

    fn try_login(&mut self, email: &str, password: &str) -> Result<(), LoginError> {
        if Credential::new(email, password).is_incomplete() {
            return Err(LoginError::MissingFields);
        }

        if !self.users.verify(email, password) {
            info!("Rejected login for {}", email);
            return Err(LoginError::InvalidCredentials);
        }

        if self.form.remember_me {
            self.store.set(keys::REMEMBERED_EMAIL, email)?;
            self.store.set(keys::REMEMBERED_PASSWORD, password)?;
            self.store.set_flag(keys::REMEMBER_ME, true)?;
        } else {
            self.store.remove(keys::REMEMBERED_EMAIL)?;
            self.store.remove(keys::REMEMBERED_PASSWORD)?;
            self.store.remove(keys::REMEMBER_ME)?;
        }

        self.store.set_flag(keys::IS_LOGGED_IN, true)?;
        self.store.set(keys::USER_EMAIL, email)?;

        info!("Logged in as {}", email);
        self.session = Session::LoggedIn(email.to_string());
        Ok(())
    }

    /// End the session.
    ///
    /// Remembered credentials stay in the store (and the form) when the
    /// remember preference is set; otherwise the form is cleared.
    pub fn logout(&mut self) -> anyhow::Result<()> {
        if let Session::LoggedIn(email) = &self.session {
            info!("Logging out {}", email);
        }
        self.session = Session::LoggedOut;
        self.form.error = None;

        self.store.set_flag(keys::IS_LOGGED_IN, false)?;
        self.store.remove(keys::USER_EMAIL)?;

        if !self.form.remember_me {
            self.form.email.clear();
            self.form.password.clear();
        }
        Ok(())
    }
}
