//! Analysis orchestration for the email list
//!
//! The coordinator owns one [`ItemAnalysisState`] per email and is the only
//! thing that mutates them. Requests run on Tokio's blocking pool and report
//! back through a channel; the owner pulls completions with
//! [`next_completion`](AnalysisCoordinator::next_completion) and feeds them
//! to [`apply`](AnalysisCoordinator::apply), so all state changes happen on
//! the owning task.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::{
    AnalysisClient, AnalysisRequestError, AnalysisTicket, CompletionEffect, ItemAnalysisState,
    RequestRejected, SingleFlight, analyze_async,
};
use crate::models::{AnalysisResult, EmailId, EmailItem};

/// Message shown to the user when an analysis call fails
pub const ANALYSIS_FAILED_NOTICE: &str = "Failed to analyze email. Please try again.";

/// Lookup of an id that is not in the inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no email with id {0}")]
pub struct UnknownItem(pub EmailId);

impl From<UnknownItem> for RequestRejected {
    fn from(e: UnknownItem) -> Self {
        RequestRejected::UnknownItem(e.0)
    }
}

/// A finished request, waiting to be applied
#[derive(Debug)]
pub struct AnalysisCompletion {
    pub item_id: EmailId,
    pub ticket: AnalysisTicket,
    pub outcome: Result<AnalysisResult, AnalysisRequestError>,
}

/// User-visible notice raised by a failed analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub item_id: EmailId,
    pub message: String,
    /// Underlying error, for logs or a details view
    pub detail: String,
    pub raised_at: DateTime<Utc>,
}

/// Owns the inbox's per-item analysis state
pub struct AnalysisCoordinator {
    client: Arc<dyn AnalysisClient>,
    emails: Vec<EmailItem>,
    states: HashMap<EmailId, ItemAnalysisState>,
    in_flight: SingleFlight<EmailId>,
    completions_tx: mpsc::UnboundedSender<AnalysisCompletion>,
    completions_rx: mpsc::UnboundedReceiver<AnalysisCompletion>,
    notices: VecDeque<Notice>,
}

impl AnalysisCoordinator {
    /// Create a coordinator for `emails`, in display order.
    ///
    /// Ids must be unique; later duplicates are dropped.
    pub fn new(client: Arc<dyn AnalysisClient>, emails: Vec<EmailItem>) -> Self {
        let mut states = HashMap::with_capacity(emails.len());
        let mut unique = Vec::with_capacity(emails.len());
        for email in emails {
            if states.contains_key(&email.id) {
                warn!("Dropping duplicate email id {}", email.id);
                continue;
            }
            states.insert(email.id, ItemAnalysisState::new());
            unique.push(email);
        }

        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            client,
            emails: unique,
            states,
            in_flight: SingleFlight::new(),
            completions_tx,
            completions_rx,
            notices: VecDeque::new(),
        }
    }

    pub fn emails(&self) -> &[EmailItem] {
        &self.emails
    }

    pub fn email(&self, id: EmailId) -> Option<&EmailItem> {
        self.emails.iter().find(|e| e.id == id)
    }

    pub fn state(&self, id: EmailId) -> Option<&ItemAnalysisState> {
        self.states.get(&id)
    }

    fn state_mut(&mut self, id: EmailId) -> Result<&mut ItemAnalysisState, UnknownItem> {
        self.states.get_mut(&id).ok_or(UnknownItem(id))
    }

    pub fn open(&mut self, id: EmailId) -> Result<(), UnknownItem> {
        self.state_mut(id)?.open();
        Ok(())
    }

    pub fn close(&mut self, id: EmailId) -> Result<(), UnknownItem> {
        self.state_mut(id)?.close();
        Ok(())
    }

    /// Open a closed item or close an open one; returns the new expanded state
    pub fn toggle(&mut self, id: EmailId) -> Result<bool, UnknownItem> {
        Ok(self.state_mut(id)?.toggle())
    }

    /// Show or hide an analyzed item's report
    pub fn toggle_report(&mut self, id: EmailId) -> Result<Option<bool>, UnknownItem> {
        Ok(self.state_mut(id)?.toggle_report_visibility())
    }

    /// Collapse every item and drop pending notices.
    ///
    /// Requests still in flight keep their single-flight slot until they
    /// complete, but their results come back stale.
    pub fn reset(&mut self) {
        for state in self.states.values_mut() {
            state.close();
        }
        let dropped = self.notices.len();
        self.notices.clear();
        info!(
            "Reset analysis state ({} in flight, {} notices dropped)",
            self.in_flight.len(),
            dropped
        );
    }

    /// Start analyzing an item's content.
    ///
    /// Returns as soon as the request is issued. Rejected while a request
    /// for the same item is outstanding, even one issued before the item
    /// was collapsed and re-opened. Must be called inside a Tokio runtime.
    pub fn request_analysis(&mut self, id: EmailId) -> Result<(), RequestRejected> {
        let content = self.email(id).ok_or(UnknownItem(id))?.content.clone();
        if self.in_flight.is_in_flight(&id) {
            return Err(RequestRejected::InFlight);
        }
        let handle = Handle::try_current().map_err(|_| RequestRejected::NoRuntime)?;

        let ticket = self.state_mut(id)?.request_analysis()?;
        self.in_flight.try_acquire(id);
        debug!("Analysis requested for email {}", id);

        let client = Arc::clone(&self.client);
        let tx = self.completions_tx.clone();
        handle.spawn(async move {
            let outcome = analyze_async(client, content).await;
            // Receiver gone means the coordinator was dropped; nothing to update
            let _ = tx.send(AnalysisCompletion {
                item_id: id,
                ticket,
                outcome,
            });
        });

        Ok(())
    }

    /// Wait for the next finished request
    pub async fn next_completion(&mut self) -> Option<AnalysisCompletion> {
        self.completions_rx.recv().await
    }

    /// Take a finished request if one is ready
    pub fn try_next_completion(&mut self) -> Option<AnalysisCompletion> {
        self.completions_rx.try_recv().ok()
    }

    /// Apply a finished request to its item
    pub fn apply(&mut self, completion: AnalysisCompletion) -> CompletionEffect {
        let AnalysisCompletion {
            item_id,
            ticket,
            outcome,
        } = completion;
        self.in_flight.release(&item_id);

        let detail = outcome.as_ref().err().map(|e| e.to_string());
        let Some(state) = self.states.get_mut(&item_id) else {
            return CompletionEffect::Stale;
        };

        let effect = state.complete(ticket, outcome);
        match effect {
            CompletionEffect::Analyzed => info!("Email {} analyzed", item_id),
            CompletionEffect::Failed => {
                let detail = detail.unwrap_or_default();
                warn!("Analysis of email {} failed: {}", item_id, detail);
                self.notices.push_back(Notice {
                    item_id,
                    message: ANALYSIS_FAILED_NOTICE.to_string(),
                    detail,
                    raised_at: Utc::now(),
                });
            }
            CompletionEffect::Stale => {
                debug!("Discarding stale analysis result for email {}", item_id)
            }
        }
        effect
    }

    /// Apply completions until nothing is in flight
    pub async fn settle(&mut self) {
        while !self.in_flight.is_empty() {
            match self.next_completion().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
    }

    pub fn is_in_flight(&self, id: EmailId) -> bool {
        self.in_flight.is_in_flight(&id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Drain pending user notices, oldest first
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}
