use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::api::{ApiError, TicketApi};
use crate::model::TicketStats;

const STATS_FAILED: &str = "Failed to load statistics";

#[derive(Debug)]
pub struct StatsLoaded {
    pub generation: u64,
    pub outcome: Result<TicketStats, ApiError>,
}

/// Aggregate statistics, refetched whenever the refresh counter moves
pub struct StatsPanel {
    api: Arc<dyn TicketApi>,
    stats: Option<TicketStats>,
    loading: bool,
    error: Option<String>,
    generation: u64,
    observed: Option<u64>,
    tx: UnboundedSender<StatsLoaded>,
}

impl StatsPanel {
    pub fn new(api: Arc<dyn TicketApi>) -> (Self, UnboundedReceiver<StatsLoaded>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let panel = StatsPanel {
            api,
            stats: None,
            loading: false,
            error: None,
            generation: 0,
            observed: None,
            tx,
        };
        (panel, rx)
    }

    pub fn stats(&self) -> Option<&TicketStats> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Feed the current refresh counter. Fetches when it differs from the
    /// last value seen (always on the first call).
    pub fn observe(&mut self, counter: u64) -> bool {
        if self.observed == Some(counter) {
            return false;
        }
        self.observed = Some(counter);
        self.fetch();
        true
    }

    pub fn fetch(&mut self) {
        self.generation += 1;
        self.loading = true;
        let generation = self.generation;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        debug!(generation, "fetching stats");
        tokio::spawn(async move {
            let outcome = api.stats().await;
            let _ = tx.send(StatsLoaded { generation, outcome });
        });
    }

    pub fn handle(&mut self, loaded: StatsLoaded) {
        if loaded.generation != self.generation {
            return;
        }
        self.loading = false;
        match loaded.outcome {
            Ok(stats) => {
                self.stats = Some(stats);
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "stats fetch failed");
                self.error = Some(STATS_FAILED.to_string());
            }
        }
    }
}
