//! Backend ticket service interface.
//!
//! [`TicketApi`] is the seam between the dashboard and the REST backend;
//! [`http::HttpTicketApi`] talks to the real service.

pub mod http;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::model::{Classification, FilterCriteria, NewTicket, Ticket, TicketId, TicketPatch, TicketStats};

/// Error type for backend calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend returned {status}{}", .detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
    Rejected { status: u16, detail: Option<String> },
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable detail supplied by the backend, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The backend's detail verbatim, or `fallback` when there is none
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

/// The REST surface the dashboard consumes
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// `GET /tickets/` with only the set filter keys as query parameters
    async fn list_tickets(&self, filters: &FilterCriteria) -> Result<Vec<Ticket>, ApiError>;

    /// `POST /tickets/`
    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ApiError>;

    /// `PATCH /tickets/{id}/`
    async fn update_ticket(&self, id: &TicketId, patch: &TicketPatch) -> Result<Ticket, ApiError>;

    /// `GET /tickets/stats/`
    async fn stats(&self) -> Result<TicketStats, ApiError>;

    /// `POST /tickets/classify/`
    async fn classify(&self, description: &str) -> Result<Classification, ApiError>;
}
