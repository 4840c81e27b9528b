//! Authentication: credential lookup, the login/logout state machine and
//! the route guard consumed by the front end.

mod guard;
mod manager;
mod repository;

pub use guard::{Navigation, Route, can_enter, navigate};
pub use manager::{LoginError, LoginForm, Session, SessionManager};
pub use repository::{CredentialRepository, StaticCredentialRepository};
