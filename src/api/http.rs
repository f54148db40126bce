//! HTTP client for the ticket backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ApiError, TicketApi};
use crate::model::{
    ApiConfig, Classification, FilterCriteria, NewTicket, Ticket, TicketId, TicketPatch,
    TicketStats,
};

/// [`TicketApi`] backed by the REST service
#[derive(Debug, Clone)]
pub struct HttpTicketApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTicketApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        // Url::join drops the last path segment unless the base ends in '/'
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| ApiError::Transport(format!("invalid base URL '{}': {e}", config.base_url)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(HttpTicketApi { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Transport(format!("invalid endpoint '{path}': {e}")))
    }
}

#[async_trait]
impl TicketApi for HttpTicketApi {
    async fn list_tickets(&self, filters: &FilterCriteria) -> Result<Vec<Ticket>, ApiError> {
        let mut url = self.endpoint("tickets/")?;
        let pairs = filters.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }
        debug!(%url, "fetching tickets");
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, ApiError> {
        let url = self.endpoint("tickets/")?;
        debug!(title = %ticket.title, "creating ticket");
        let response = self.client.post(url).json(ticket).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn update_ticket(&self, id: &TicketId, patch: &TicketPatch) -> Result<Ticket, ApiError> {
        let url = self.endpoint(&format!("tickets/{id}/"))?;
        debug!(%id, "updating ticket");
        let response = self.client.patch(url).json(patch).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn stats(&self) -> Result<TicketStats, ApiError> {
        let url = self.endpoint("tickets/stats/")?;
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn classify(&self, description: &str) -> Result<Classification, ApiError> {
        let url = self.endpoint("tickets/classify/")?;
        let body = serde_json::json!({ "description": description });
        let response = self.client.post(url).json(&body).send().await.map_err(transport)?;
        decode(response).await
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()));
    }
    warn!(status = %status, "backend rejected request");
    Err(ApiError::Rejected {
        status: status.as_u16(),
        detail: extract_detail(&body),
    })
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": ..}`, `{"message": ..}`, `{"error": ..}` and
/// field-error maps like `{"title": ["Too long."]}`. Non-JSON bodies are
/// ignored.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    for key in ["detail", "message", "error"] {
        if let Some(text) = object.get(key).and_then(flatten_messages) {
            return Some(text);
        }
    }

    let fields: Vec<String> = object
        .iter()
        .filter_map(|(field, messages)| {
            flatten_messages(messages).map(|text| format!("{field}: {text}"))
        })
        .collect();
    if fields.is_empty() { None } else { Some(fields.join("; ")) }
}

fn flatten_messages(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_messages).collect();
            if parts.is_empty() { None } else { Some(parts.join(" ")) }
        }
        _ => None,
    }
}
