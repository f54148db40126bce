use tracing::{debug, warn};

use crate::api::ApiError;
use crate::model::{Category, Classification, Priority};

/// The newest accepted classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub category: Category,
    pub priority: Priority,
    /// Sequence number of the request that produced it
    pub seq: u64,
}

/// Whether a description is long enough to be worth classifying.
/// Counts characters after trimming surrounding whitespace.
pub fn qualifies_for_classification(description: &str, min_chars: usize) -> bool {
    description.trim().chars().count() >= min_chars
}

/// Orders classification responses by the request that produced them
/// rather than by arrival.
///
/// Every request gets the next sequence number from [`issue`]. A response
/// is accepted only if its number is above the highest one accepted so
/// far (the watermark); anything else is stale and dropped.
///
/// [`issue`]: ClassificationPipeline::issue
#[derive(Debug, Default)]
pub struct ClassificationPipeline {
    issued: u64,
    watermark: u64,
    in_flight: usize,
    current: Option<Suggestion>,
}

impl ClassificationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the sequence number for a request about to be sent
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.in_flight += 1;
        debug!(seq = self.issued, "classification issued");
        self.issued
    }

    /// Record the outcome of request `seq`. Returns the suggestion when it
    /// became current, `None` when the response was stale or a failure.
    pub fn resolve(
        &mut self,
        seq: u64,
        outcome: Result<Classification, ApiError>,
    ) -> Option<Suggestion> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let classification = match outcome {
            Ok(c) => c,
            Err(e) => {
                warn!(seq, error = %e, "classification failed");
                return None;
            }
        };

        if seq <= self.watermark {
            debug!(seq, watermark = self.watermark, "discarding stale classification");
            return None;
        }

        self.watermark = seq;
        let suggestion = Suggestion {
            category: classification.suggested_category,
            priority: classification.suggested_priority,
            seq,
        };
        self.current = Some(suggestion);
        Some(suggestion)
    }

    /// Forget the current suggestion and ignore anything still in flight
    pub fn reset(&mut self) {
        self.current = None;
        self.watermark = self.issued;
    }

    pub fn current(&self) -> Option<&Suggestion> {
        self.current.as_ref()
    }

    /// True while any issued request has not resolved
    pub fn is_classifying(&self) -> bool {
        self.in_flight > 0
    }

    #[cfg(test)]
    fn watermark(&self) -> u64 {
        self.watermark
    }
}
