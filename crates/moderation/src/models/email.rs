//! Email item model

use serde::{Deserialize, Serialize};

/// Stable identifier of an email in the inbox dataset
pub type EmailId = u64;

/// A single analyzable message.
///
/// Supplied by a dataset provider and never mutated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailItem {
    /// Unique, stable identifier
    pub id: EmailId,
    /// Sender address, when the dataset has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub subject: String,
    /// Full body; this is what gets sent for analysis
    pub content: String,
}

impl EmailItem {
    pub fn new(id: EmailId, subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            sender: None,
            subject: subject.into(),
            content: content.into(),
        }
    }

    /// Set the sender address
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }
}
