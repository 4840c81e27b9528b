//! Operator dashboard: per-user counts with a live email filter

mod filter;

pub use filter::{DashboardFilter, filter_rows};
