use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{ApiError, TicketApi};
use crate::model::{Classification, IntakeConfig, NewTicket, Ticket, TicketId, TicketPatch};
use crate::store::refresh::RefreshCoordinator;

use super::classify::{ClassificationPipeline, Suggestion, qualifies_for_classification};
use super::debounce::{DebounceTimer, DebounceToken};
use super::draft::{FieldValue, FormDraft};
use super::validate::{ValidationError, validate};

const CREATE_FAILED: &str = "Failed to create ticket. Please try again.";
const UPDATE_FAILED: &str = "Failed to update ticket. Please try again.";

/// Completions delivered back to the controller by its timers and requests
#[derive(Debug)]
pub enum IntakeEvent {
    ClassifyDue(DebounceToken),
    Classified {
        seq: u64,
        outcome: Result<Classification, ApiError>,
    },
    Submitted {
        mode: SubmitMode,
        outcome: Result<Ticket, ApiError>,
    },
    NoticeExpired(DebounceToken),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update(TicketId),
}

/// Message shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }
}

/// Snapshot of what the form is doing. Classifying and submitting are
/// independent; either can be true while the other is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeStatus {
    pub classifying: bool,
    pub submitting: bool,
    pub notice: Option<Notice>,
}

/// A mutation the backend acknowledged, for the collection store
#[derive(Debug, Clone, PartialEq)]
pub enum Acknowledgement {
    Created(Ticket),
    Updated(Ticket),
}

/// Owns the intake form: debounced classification, touch-gated
/// suggestion merge, validation and submission.
pub struct IntakeController {
    api: Arc<dyn TicketApi>,
    refresh: RefreshCoordinator,
    settings: IntakeConfig,
    draft: FormDraft,
    pipeline: ClassificationPipeline,
    classify_timer: DebounceTimer,
    notice_timer: DebounceTimer,
    submitting: bool,
    notice: Option<Notice>,
    tx: UnboundedSender<IntakeEvent>,
}

impl IntakeController {
    pub fn new(
        api: Arc<dyn TicketApi>,
        refresh: RefreshCoordinator,
        settings: IntakeConfig,
    ) -> (Self, UnboundedReceiver<IntakeEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = IntakeController {
            api,
            refresh,
            settings,
            draft: FormDraft::default(),
            pipeline: ClassificationPipeline::new(),
            classify_timer: DebounceTimer::new(),
            notice_timer: DebounceTimer::new(),
            submitting: false,
            notice: None,
            tx,
        };
        (controller, rx)
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        self.pipeline.current()
    }

    pub fn status(&self) -> IntakeStatus {
        IntakeStatus {
            classifying: self.pipeline.is_classifying(),
            submitting: self.submitting,
            notice: self.notice.clone(),
        }
    }

    pub fn on_title_change(&mut self, text: impl Into<String>) {
        self.draft.title = text.into();
    }

    /// Update the description and re-arm (or disarm) classification
    pub fn on_description_change(&mut self, text: impl Into<String>) {
        self.draft.description = text.into();
        if qualifies_for_classification(&self.draft.description, self.settings.min_classify_chars) {
            let tx = self.tx.clone();
            self.classify_timer.schedule(self.settings.debounce(), move |token| {
                let _ = tx.send(IntakeEvent::ClassifyDue(token));
            });
        } else {
            self.classify_timer.cancel();
        }
    }

    pub fn on_field_change(&mut self, value: FieldValue) {
        self.draft.set_field(value);
    }

    /// Load an existing ticket into the form for editing
    pub fn begin_edit(&mut self, ticket: &Ticket) {
        self.discard_classification();
        self.clear_notice();
        self.draft = FormDraft::from_ticket(ticket);
        debug!(id = %ticket.id, "editing ticket");
    }

    /// Leave edit mode with an empty draft
    pub fn cancel_edit(&mut self) {
        self.discard_classification();
        self.draft.reset();
    }

    /// Validate and send the draft. Validation failures are returned and
    /// also shown as the notice; no request is made for them. A second
    /// submit while one is outstanding is ignored.
    pub fn submit(&mut self) -> Result<(), ValidationError> {
        if self.submitting {
            debug!("submit ignored, already submitting");
            return Ok(());
        }
        self.clear_notice();

        let body = match validate(&self.draft) {
            Ok(body) => body,
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
                return Err(e);
            }
        };

        let mode = match &self.draft.editing {
            Some(id) => SubmitMode::Update(id.clone()),
            None => SubmitMode::Create,
        };
        info!(?mode, title = %body.title, "submitting ticket");
        self.submitting = true;

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = match &mode {
                SubmitMode::Create => api.create_ticket(&body).await,
                SubmitMode::Update(id) => api.update_ticket(id, &full_patch(body)).await,
            };
            let _ = tx.send(IntakeEvent::Submitted { mode, outcome });
        });
        Ok(())
    }

    /// Apply a completion. Returns the acknowledged ticket when a
    /// submission succeeded so the caller can hand it to the collection.
    pub fn handle(&mut self, event: IntakeEvent) -> Option<Acknowledgement> {
        match event {
            IntakeEvent::ClassifyDue(token) => {
                if self.classify_timer.claim(token) {
                    self.dispatch_classification();
                }
                None
            }
            IntakeEvent::Classified { seq, outcome } => {
                if let Some(suggestion) = self.pipeline.resolve(seq, outcome) {
                    self.draft.merge(&suggestion);
                }
                None
            }
            IntakeEvent::Submitted { mode, outcome } => self.finish_submit(mode, outcome),
            IntakeEvent::NoticeExpired(token) => {
                if self.notice_timer.claim(token) && matches!(self.notice, Some(Notice::Success(_))) {
                    self.notice = None;
                }
                None
            }
        }
    }

    /// Cancel both timers. Call when the form goes away.
    pub fn shutdown(&mut self) {
        self.classify_timer.cancel();
        self.notice_timer.cancel();
    }

    fn dispatch_classification(&mut self) {
        let description = self.draft.description.clone();
        if !qualifies_for_classification(&description, self.settings.min_classify_chars) {
            return;
        }
        let seq = self.pipeline.issue();
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = api.classify(&description).await;
            let _ = tx.send(IntakeEvent::Classified { seq, outcome });
        });
    }

    fn finish_submit(
        &mut self,
        mode: SubmitMode,
        outcome: Result<Ticket, ApiError>,
    ) -> Option<Acknowledgement> {
        self.submitting = false;
        match outcome {
            Ok(ticket) => {
                info!(id = %ticket.id, "ticket acknowledged");
                self.discard_classification();
                self.draft.reset();
                let (message, ack) = match mode {
                    SubmitMode::Create => ("Ticket created successfully", Acknowledgement::Created(ticket)),
                    SubmitMode::Update(_) => ("Ticket updated successfully", Acknowledgement::Updated(ticket)),
                };
                self.show_success(message);
                self.refresh.bump();
                Some(ack)
            }
            Err(e) => {
                warn!(error = %e, "ticket submission failed");
                let fallback = match mode {
                    SubmitMode::Create => CREATE_FAILED,
                    SubmitMode::Update(_) => UPDATE_FAILED,
                };
                self.notice = Some(Notice::Error(e.user_message(fallback)));
                None
            }
        }
    }

    fn show_success(&mut self, message: &str) {
        self.notice = Some(Notice::Success(message.to_string()));
        let tx = self.tx.clone();
        self.notice_timer.schedule(self.settings.notice_ttl(), move |token| {
            let _ = tx.send(IntakeEvent::NoticeExpired(token));
        });
    }

    fn clear_notice(&mut self) {
        self.notice_timer.cancel();
        self.notice = None;
    }

    fn discard_classification(&mut self) {
        self.classify_timer.cancel();
        self.pipeline.reset();
    }
}

fn full_patch(body: NewTicket) -> TicketPatch {
    TicketPatch {
        title: Some(body.title),
        description: Some(body.description),
        category: Some(body.category),
        priority: Some(body.priority),
        status: None,
    }
}
