//! Scripted in-memory [`TicketApi`] for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::{ApiError, TicketApi};
use crate::model::{
    Category, Classification, FilterCriteria, NewTicket, Priority, Status, Ticket, TicketId,
    TicketPatch, TicketStats,
};

/// A call the fake received, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(FilterCriteria),
    Create(NewTicket),
    Update(TicketId, TicketPatch),
    Stats,
    Classify(String),
}

#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    tickets: Mutex<Vec<Ticket>>,
    classifications: Mutex<VecDeque<Result<Classification, String>>>,
    mutation_failure: Mutex<Option<Option<String>>>,
    list_failure: Mutex<bool>,
    stats: Mutex<TicketStats>,
    next_id: AtomicU64,
}

impl FakeApi {
    pub fn new() -> Self {
        FakeApi {
            next_id: AtomicU64::new(100),
            ..Default::default()
        }
    }

    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let api = FakeApi::new();
        *api.tickets.lock().unwrap() = tickets;
        api
    }

    /// Queue the response for the next classify call
    pub fn push_classification(&self, category: Category, priority: Priority) {
        self.classifications.lock().unwrap().push_back(Ok(Classification {
            suggested_category: category,
            suggested_priority: priority,
        }));
    }

    pub fn push_classification_failure(&self) {
        self.classifications
            .lock()
            .unwrap()
            .push_back(Err("classifier unavailable".into()));
    }

    /// Make create/update fail, with an optional backend detail
    pub fn fail_mutations(&self, detail: Option<&str>) {
        *self.mutation_failure.lock().unwrap() = Some(detail.map(str::to_string));
    }

    pub fn fail_lists(&self, fail: bool) {
        *self.list_failure.lock().unwrap() = fail;
    }

    pub fn set_stats(&self, stats: TicketStats) {
        *self.stats.lock().unwrap() = stats;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn classify_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Classify(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn mutation_error(&self) -> Option<ApiError> {
        self.mutation_failure
            .lock()
            .unwrap()
            .clone()
            .map(|detail| ApiError::Rejected { status: 400, detail })
    }
}

/// A ticket with fixed timestamps, for fixtures
pub fn ticket(id: &str, title: &str) -> Ticket {
    Ticket {
        id: TicketId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        category: Category::General,
        priority: Priority::Medium,
        status: Status::Open,
        created_at: Utc.with_ymd_and_hms(2025, 5, 14, 10, 0, 0).unwrap(),
        updated_at: None,
    }
}

#[async_trait]
impl TicketApi for FakeApi {
    async fn list_tickets(&self, filters: &FilterCriteria) -> Result<Vec<Ticket>, ApiError> {
        self.record(Call::List(filters.clone()));
        if *self.list_failure.lock().unwrap() {
            return Err(ApiError::Transport("connection refused".into()));
        }
        Ok(self.tickets.lock().unwrap().clone())
    }

    async fn create_ticket(&self, new: &NewTicket) -> Result<Ticket, ApiError> {
        self.record(Call::Create(new.clone()));
        if let Some(err) = self.mutation_error() {
            return Err(err);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut created = ticket(&id.to_string(), &new.title);
        created.description = new.description.clone();
        created.category = new.category;
        created.priority = new.priority;
        Ok(created)
    }

    async fn update_ticket(&self, id: &TicketId, patch: &TicketPatch) -> Result<Ticket, ApiError> {
        self.record(Call::Update(id.clone(), patch.clone()));
        if let Some(err) = self.mutation_error() {
            return Err(err);
        }
        let mut updated = self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .unwrap_or_else(|| ticket(id.as_str(), "untitled"));
        if let Some(title) = &patch.title {
            updated.title = title.clone();
        }
        if let Some(description) = &patch.description {
            updated.description = description.clone();
        }
        if let Some(category) = patch.category {
            updated.category = category;
        }
        if let Some(priority) = patch.priority {
            updated.priority = priority;
        }
        if let Some(status) = patch.status {
            updated.status = status;
        }
        Ok(updated)
    }

    async fn stats(&self) -> Result<TicketStats, ApiError> {
        self.record(Call::Stats);
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn classify(&self, description: &str) -> Result<Classification, ApiError> {
        self.record(Call::Classify(description.to_string()));
        match self.classifications.lock().unwrap().pop_front() {
            Some(Ok(c)) => Ok(c),
            Some(Err(msg)) => Err(ApiError::Transport(msg)),
            None => Err(ApiError::Transport("no scripted classification".into())),
        }
    }
}
