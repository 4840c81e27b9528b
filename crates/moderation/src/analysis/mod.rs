//! Message analysis against the remote classification service
//!
//! This module provides:
//! - The [`AnalysisClient`] trait and its HTTP implementation
//! - The per-item [`ItemAnalysisState`] state machine
//! - [`AnalysisCoordinator`], which owns every item's state and keeps at
//!   most one request in flight per item
//! - Text rendering of a result for display

mod client;
mod coordinator;
mod report;
mod single_flight;
mod state;

pub use client::{AnalysisClient, AnalysisRequestError, HttpAnalysisClient, analyze_async};
pub use coordinator::{ANALYSIS_FAILED_NOTICE, AnalysisCompletion, AnalysisCoordinator, Notice, UnknownItem};
pub use report::AnalysisReport;
pub use single_flight::SingleFlight;
pub use state::{AnalysisPhase, AnalysisTicket, CompletionEffect, ItemAnalysisState, RequestRejected};
