//! Case-insensitive email filter
//!
//! Pure and synchronous. The full dataset is re-scanned for every query
//! change; at dashboard scale there is nothing worth indexing.

use crate::models::DashboardRow;

/// Rows whose email contains `query`, ignoring case, in original order.
///
/// An empty query returns every row.
pub fn filter_rows<'a>(rows: &'a [DashboardRow], query: &str) -> Vec<&'a DashboardRow> {
    if query.is_empty() {
        return rows.iter().collect();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| row.email.to_lowercase().contains(&needle))
        .collect()
}

/// Dashboard rows plus the current filter text
#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    rows: Vec<DashboardRow>,
    query: String,
}

impl DashboardFilter {
    pub fn new(rows: Vec<DashboardRow>) -> Self {
        Self {
            rows,
            query: String::new(),
        }
    }

    pub fn rows(&self) -> &[DashboardRow] {
        &self.rows
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the filter text (one call per keystroke is fine)
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Rows matching the current query
    pub fn visible(&self) -> Vec<&DashboardRow> {
        filter_rows(&self.rows, &self.query)
    }

    /// True when the query matches nothing ("No results found.")
    pub fn is_empty_result(&self) -> bool {
        self.visible().is_empty()
    }
}
