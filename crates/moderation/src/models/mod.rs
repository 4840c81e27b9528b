//! Domain models

mod analysis;
mod credential;
mod dashboard;
mod email;

pub use analysis::{AnalysisResult, CategoryMatch};
pub use credential::Credential;
pub use dashboard::DashboardRow;
pub use email::{EmailId, EmailItem};
