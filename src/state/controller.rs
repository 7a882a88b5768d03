/// Upload controller
///
/// Owns the lifecycle of one analysis at a time: the current preview, the
/// request state, and the ticket that ties a response to the submission
/// that caused it. All transitions happen on the UI thread; the only
/// suspension point is the remote call in [`run_analysis`].

use std::sync::Arc;

use crate::api::AnalysisService;
use crate::error::AnalysisError;
use crate::state::analysis::AnalysisResult;
use crate::state::data::{ImageSelection, Preview};
use crate::state::notification::Notification;

/// Identifies one submission. Issued in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Client-visible state of the current analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    /// Nothing selected yet
    Idle,
    /// Image selected, request not yet dispatched
    Previewing,
    /// Request sent, awaiting the response for this ticket
    InFlight(Ticket),
    Succeeded(AnalysisResult),
    /// Human-readable reason; the preview is kept
    Failed(String),
}

/// Work handed to the async side: which ticket, which image
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: Ticket,
    pub image: ImageSelection,
}

/// Outcome of one remote call, tagged with its ticket
#[derive(Debug, Clone)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<AnalysisResult, AnalysisError>,
}

#[derive(Debug)]
pub struct UploadController {
    state: AnalysisState,
    preview: Option<Preview>,
    next_ticket: u64,
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadController {
    pub fn new() -> Self {
        Self {
            state: AnalysisState::Idle,
            preview: None,
            next_ticket: 1,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// True exactly while a request is outstanding
    pub fn is_uploading(&self) -> bool {
        matches!(self.state, AnalysisState::InFlight(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            AnalysisState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            AnalysisState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Accept a new image and move to `InFlight`.
    ///
    /// The previous preview is released here. A submission made while
    /// another is in flight supersedes it: the older response will be
    /// discarded by [`complete`](Self::complete) when it arrives.
    pub fn submit(&mut self, image: ImageSelection) -> Submission {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        if let AnalysisState::InFlight(previous) = self.state {
            tracing::debug!(
                superseded = previous.value(),
                ticket = ticket.value(),
                "New selection while a request is in flight",
            );
        }

        let preview = Preview::new(ticket.value(), &image);
        if let Some(released) = self.preview.replace(preview) {
            tracing::debug!(preview = released.id(), file = released.file_name(), "Released preview");
        }
        // Dispatch is immediate, so Previewing never outlives this call
        self.state = AnalysisState::Previewing;

        tracing::info!(
            ticket = ticket.value(),
            file = image.file_name(),
            mime = image.mime(),
            origin = ?image.origin(),
            "Submitting image for analysis",
        );
        self.state = AnalysisState::InFlight(ticket);

        Submission { ticket, image }
    }

    /// Apply a completed request.
    ///
    /// Only the response for the ticket currently in flight is applied;
    /// anything else is stale and ignored. Returns the notification to
    /// show, if the completion was applied.
    pub fn complete(&mut self, completion: Completion) -> Option<Notification> {
        match self.state {
            AnalysisState::InFlight(current) if current == completion.ticket => {}
            _ => {
                tracing::debug!(
                    ticket = completion.ticket.value(),
                    "Discarding stale analysis response",
                );
                return None;
            }
        }

        match completion.outcome {
            Ok(result) => {
                tracing::info!(
                    ticket = completion.ticket.value(),
                    category = %result.classified_soil_moisture,
                    score = result.moisture_score,
                    "Analysis complete",
                );
                self.state = AnalysisState::Succeeded(result);
                Some(Notification::analysis_complete())
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!(ticket = completion.ticket.value(), error = %message, "Analysis failed");
                let notification = Notification::analysis_failed(&message);
                self.state = AnalysisState::Failed(message);
                Some(notification)
            }
        }
    }
}

/// Run the remote call for a submission.
///
/// Always resolves to a [`Completion`]; errors are values, so the
/// controller leaves `InFlight` on every path.
pub async fn run_analysis(service: Arc<dyn AnalysisService>, submission: Submission) -> Completion {
    let outcome = service.analyze(&submission.image).await;
    Completion {
        ticket: submission.ticket,
        outcome,
    }
}
