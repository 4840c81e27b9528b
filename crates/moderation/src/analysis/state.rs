//! Per-item analysis state machine
//!
//! ```text
//!            request            Ok
//!   Idle ────────────▶ Loading ────▶ Analyzed
//!    ▲                   │
//!    │ close()           │ Err
//!    │                   ▼
//!    └──── (any) ◀──── Failed ── request (retry) ──▶ Loading
//! ```
//!
//! Every transition goes through a method here, so illegal combinations
//! such as loading while holding a result cannot be represented.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::AnalysisRequestError;
use crate::models::{AnalysisResult, EmailId};

/// Where an item is in its analysis cycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Loading,
    Analyzed {
        result: AnalysisResult,
        report_visible: bool,
        analyzed_at: DateTime<Utc>,
    },
    Failed {
        error: AnalysisRequestError,
    },
}

/// Handle for one issued request.
///
/// Completions are matched against the ticket so that a response arriving
/// after the item was collapsed is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    generation: u64,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Why a request for analysis was not issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestRejected {
    #[error("no email with id {0}")]
    UnknownItem(EmailId),

    #[error("analysis already in progress")]
    InFlight,

    #[error("email has already been analyzed")]
    AlreadyAnalyzed,

    #[error("open the email before analyzing it")]
    Collapsed,

    #[error("no async runtime available to run the analysis")]
    NoRuntime,
}

/// What applying a completion did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionEffect {
    Analyzed,
    Failed,
    /// The ticket no longer matches; nothing changed
    Stale,
}

/// Analysis state of one email item
#[derive(Debug, Clone, Default)]
pub struct ItemAnalysisState {
    expanded: bool,
    phase: AnalysisPhase,
    generation: u64,
}

impl ItemAnalysisState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn phase(&self) -> &AnalysisPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, AnalysisPhase::Loading)
    }

    /// The held result, if analyzed
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            AnalysisPhase::Analyzed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn report_visible(&self) -> bool {
        matches!(
            self.phase,
            AnalysisPhase::Analyzed {
                report_visible: true,
                ..
            }
        )
    }

    pub fn error(&self) -> Option<&AnalysisRequestError> {
        match &self.phase {
            AnalysisPhase::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Expand the item body
    pub fn open(&mut self) {
        self.expanded = true;
    }

    /// Collapse the item. Always returns to `Idle` and forgets any result;
    /// a request still in flight will come back stale.
    pub fn close(&mut self) {
        self.expanded = false;
        self.phase = AnalysisPhase::Idle;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Flip between open and closed. Returns the new expanded state.
    pub fn toggle(&mut self) -> bool {
        if self.expanded {
            self.close();
        } else {
            self.open();
        }
        self.expanded
    }

    /// Move to `Loading` and hand out a ticket for the request.
    ///
    /// Allowed from `Idle` and, as a user retry, from `Failed`.
    pub fn request_analysis(&mut self) -> Result<AnalysisTicket, RequestRejected> {
        if !self.expanded {
            return Err(RequestRejected::Collapsed);
        }
        match self.phase {
            AnalysisPhase::Loading => Err(RequestRejected::InFlight),
            AnalysisPhase::Analyzed { .. } => Err(RequestRejected::AlreadyAnalyzed),
            AnalysisPhase::Idle | AnalysisPhase::Failed { .. } => {
                self.generation = self.generation.wrapping_add(1);
                self.phase = AnalysisPhase::Loading;
                Ok(AnalysisTicket {
                    generation: self.generation,
                })
            }
        }
    }

    /// Apply the outcome of the request identified by `ticket`
    pub fn complete(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, AnalysisRequestError>,
    ) -> CompletionEffect {
        if !self.is_loading() || ticket.generation != self.generation {
            return CompletionEffect::Stale;
        }

        match outcome {
            Ok(result) => {
                self.phase = AnalysisPhase::Analyzed {
                    result,
                    report_visible: false,
                    analyzed_at: Utc::now(),
                };
                CompletionEffect::Analyzed
            }
            Err(error) => {
                self.phase = AnalysisPhase::Failed { error };
                CompletionEffect::Failed
            }
        }
    }

    /// Show or hide the report. Only meaningful once analyzed; returns the
    /// new visibility, or `None` if there is no report.
    pub fn toggle_report_visibility(&mut self) -> Option<bool> {
        match &mut self.phase {
            AnalysisPhase::Analyzed { report_visible, .. } => {
                *report_visible = !*report_visible;
                Some(*report_visible)
            }
            _ => None,
        }
    }
}
