//! Per-user aggregate row for the operator dashboard

use serde::{Deserialize, Serialize};

/// Aggregate microaggression counts for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub user_id: u64,
    pub email: String,
    #[serde(rename = "nonMicroAggression")]
    pub non_count: u32,
    #[serde(rename = "moderateMicroAggression")]
    pub moderate_count: u32,
    #[serde(rename = "highMicroAggression")]
    pub high_count: u32,
}

impl DashboardRow {
    pub fn new(user_id: u64, email: impl Into<String>, counts: (u32, u32, u32)) -> Self {
        let (non_count, moderate_count, high_count) = counts;
        Self {
            user_id,
            email: email.into(),
            non_count,
            moderate_count,
            high_count,
        }
    }
}
