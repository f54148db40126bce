use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::api::{ApiError, TicketApi};
use crate::model::{FilterCriteria, Ticket, TicketId, TicketPatch};

use super::refresh::RefreshCoordinator;

const FETCH_FAILED: &str = "Failed to fetch tickets";
const UPDATE_FAILED: &str = "Failed to update ticket";

#[derive(Debug)]
pub enum CollectionEvent {
    Fetched {
        generation: u64,
        outcome: Result<Vec<Ticket>, ApiError>,
    },
    Updated {
        id: TicketId,
        outcome: Result<Ticket, ApiError>,
    },
}

/// Filter criteria and the ticket list they select.
///
/// The list is only changed by fetch results and backend
/// acknowledgements. Each fetch carries a generation; a result whose
/// generation is not the latest one issued is dropped.
pub struct CollectionStore {
    api: Arc<dyn TicketApi>,
    refresh: RefreshCoordinator,
    filters: FilterCriteria,
    tickets: Vec<Ticket>,
    generation: u64,
    loading: bool,
    error: Option<String>,
    pending_updates: HashSet<TicketId>,
    update_error: Option<String>,
    tx: UnboundedSender<CollectionEvent>,
}

impl CollectionStore {
    pub fn new(
        api: Arc<dyn TicketApi>,
        refresh: RefreshCoordinator,
    ) -> (Self, UnboundedReceiver<CollectionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let store = CollectionStore {
            api,
            refresh,
            filters: FilterCriteria::default(),
            tickets: Vec::new(),
            generation: 0,
            loading: false,
            error: None,
            pending_updates: HashSet::new(),
            update_error: None,
            tx,
        };
        (store, rx)
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message for the last failed fetch, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update_error(&self) -> Option<&str> {
        self.update_error.as_deref()
    }

    pub fn is_updating(&self, id: &TicketId) -> bool {
        self.pending_updates.contains(id)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the filter criteria. Refetches once when they changed;
    /// returns whether they did.
    pub fn set_filters(&mut self, filters: FilterCriteria) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.refresh();
        true
    }

    /// Drop every constraint at once
    pub fn clear_filters(&mut self) -> bool {
        self.set_filters(FilterCriteria::default())
    }

    /// Fetch the list for the current criteria, superseding any fetch in flight
    pub fn refresh(&mut self) {
        self.generation += 1;
        self.loading = true;
        let generation = self.generation;
        let filters = self.filters.clone();
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        debug!(generation, ?filters, "fetching ticket list");
        tokio::spawn(async move {
            let outcome = api.list_tickets(&filters).await;
            let _ = tx.send(CollectionEvent::Fetched { generation, outcome });
        });
    }

    /// Put a freshly created ticket at the front
    pub fn create(&mut self, ticket: Ticket) {
        self.tickets.retain(|t| t.id != ticket.id);
        self.tickets.insert(0, ticket);
    }

    /// Send a partial update. The list changes when the backend acknowledges.
    pub fn update(&mut self, id: TicketId, patch: TicketPatch) {
        if patch.is_empty() {
            return;
        }
        self.pending_updates.insert(id.clone());
        self.update_error = None;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = api.update_ticket(&id, &patch).await;
            let _ = tx.send(CollectionEvent::Updated { id, outcome });
        });
    }

    /// Swap in an acknowledged ticket at its current position.
    /// Returns false when no ticket with that id is listed.
    pub fn replace(&mut self, ticket: Ticket) -> bool {
        match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(slot) => {
                *slot = ticket;
                true
            }
            None => false,
        }
    }

    pub fn handle(&mut self, event: CollectionEvent) {
        match event {
            CollectionEvent::Fetched { generation, outcome } => {
                if generation != self.generation {
                    debug!(generation, latest = self.generation, "ignoring superseded fetch");
                    return;
                }
                self.loading = false;
                match outcome {
                    Ok(tickets) => {
                        debug!(count = tickets.len(), "ticket list loaded");
                        self.tickets = tickets;
                        self.error = None;
                    }
                    Err(e) => {
                        warn!(error = %e, "ticket fetch failed");
                        self.error = Some(FETCH_FAILED.to_string());
                    }
                }
            }
            CollectionEvent::Updated { id, outcome } => {
                self.pending_updates.remove(&id);
                match outcome {
                    Ok(ticket) => {
                        info!(%id, status = %ticket.status, "ticket updated");
                        self.replace(ticket);
                        self.refresh.bump();
                    }
                    Err(e) => {
                        warn!(%id, error = %e, "ticket update failed");
                        self.update_error = Some(e.user_message(UPDATE_FAILED));
                    }
                }
            }
        }
    }
}
