//! Dataset providers for the inbox and the dashboard
//!
//! The core only reads these. [`BuiltinDataset`] ships sample data so the
//! app works out of the box; [`JsonDataset`] reads the same shape from disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{DashboardRow, EmailItem};

/// Supplies the static datasets the views display
pub trait DatasetProvider: Send + Sync {
    /// Inbox items, in display order
    fn emails(&self) -> Result<Vec<EmailItem>>;

    /// Dashboard rows, in display order
    fn dashboard_rows(&self) -> Result<Vec<DashboardRow>>;
}

/// Sample data compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDataset;

impl DatasetProvider for BuiltinDataset {
    fn emails(&self) -> Result<Vec<EmailItem>> {
        Ok(sample_emails())
    }

    fn dashboard_rows(&self) -> Result<Vec<DashboardRow>> {
        Ok(sample_dashboard_rows())
    }
}

/// On-disk dataset file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub emails: Vec<EmailItem>,
    #[serde(default)]
    pub dashboard: Vec<DashboardRow>,
}

/// Dataset read from a JSON file of the [`DatasetFile`] shape.
///
/// The file is re-read on every call so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct JsonDataset {
    path: PathBuf,
}

impl JsonDataset {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> Result<DatasetFile> {
        config::load_json_file(&self.path)
    }
}

impl DatasetProvider for JsonDataset {
    fn emails(&self) -> Result<Vec<EmailItem>> {
        Ok(self.load()?.emails)
    }

    fn dashboard_rows(&self) -> Result<Vec<DashboardRow>> {
        Ok(self.load()?.dashboard)
    }
}

/// Sample inbox
pub fn sample_emails() -> Vec<EmailItem> {
    vec![
        EmailItem::new(
            1,
            "Meeting Reminder",
            "Just a reminder that our weekly sync starts at 10:00 tomorrow. Bring your notes.",
        )
        .with_sender("alice@example.com"),
        EmailItem::new(
            2,
            "Project Update",
            "The migration finished over the weekend and all services are green.",
        )
        .with_sender("bob@example.com"),
        EmailItem::new(
            3,
            "Happy Birthday!",
            "Wishing you a wonderful birthday. Cake is in the break room at three.",
        )
        .with_sender("charlie@example.com"),
        EmailItem::new(
            4,
            "Newsletter",
            "This month: new office plants, the quarterly survey, and a recap of the hackathon.",
        )
        .with_sender("david@example.com"),
        EmailItem::new(
            5,
            "Invitation",
            "You're invited to the team dinner next Friday. Let me know about dietary needs.",
        )
        .with_sender("eve@example.com"),
        EmailItem::new(
            6,
            "About your presentation",
            "You're so articulate for someone with your background. Where are you really from?",
        )
        .with_sender("frank@example.com"),
        EmailItem::new(
            7,
            "Get Your Act Together",
            "This report is garbage. Stop being so emotional and fix it before anyone sees it.",
        )
        .with_sender("grace@example.com"),
        EmailItem::new(
            8,
            "Quick question",
            "Could you send me the slides from yesterday? Thanks!",
        )
        .with_sender("heidi@example.com"),
    ]
}

/// Sample per-user dashboard counts
pub fn sample_dashboard_rows() -> Vec<DashboardRow> {
    vec![
        DashboardRow::new(1, "user1@example.com", (5, 2, 1)),
        DashboardRow::new(2, "user2@example.com", (3, 4, 0)),
        DashboardRow::new(3, "user3@example.com", (8, 1, 3)),
        DashboardRow::new(4, "user4@example.com", (2, 3, 1)),
        DashboardRow::new(5, "user5@example.com", (6, 1, 4)),
        DashboardRow::new(6, "user6@example.com", (4, 5, 2)),
        DashboardRow::new(7, "user7@example.com", (7, 2, 1)),
        DashboardRow::new(8, "user8@example.com", (1, 3, 0)),
        DashboardRow::new(9, "user9@example.com", (5, 0, 5)),
        DashboardRow::new(10, "user10@example.com", (9, 1, 2)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_email_ids_are_unique() {
        let emails = sample_emails();
        let ids: HashSet<_> = emails.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), emails.len());
        let seven = emails.iter().find(|e| e.id == 7).unwrap();
        assert_eq!(seven.subject, "Get Your Act Together");
    }

    #[test]
    fn test_json_dataset() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dataset.json");
        std::fs::write(
            &path,
            r#"{
                "emails": [{"id": 1, "subject": "Hi", "content": "Hello there"}],
                "dashboard": [{"userId": 1, "email": "a@b.c", "nonMicroAggression": 1,
                               "moderateMicroAggression": 0, "highMicroAggression": 0}]
            }"#,
        )
        .unwrap();

        let dataset = JsonDataset::new(&path);
        let emails = dataset.emails().unwrap();
        assert_eq!(emails, vec![EmailItem::new(1, "Hi", "Hello there")]);
        assert_eq!(dataset.dashboard_rows().unwrap()[0].email, "a@b.c");
    }

    #[test]
    fn test_json_dataset_sections_are_optional() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dataset.json");
        std::fs::write(&path, r#"{"emails": []}"#).unwrap();

        let dataset = JsonDataset::new(&path);
        assert!(dataset.dashboard_rows().unwrap().is_empty());
    }
}
