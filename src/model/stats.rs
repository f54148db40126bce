use serde::{Deserialize, Serialize};

use super::ticket::{Category, Priority};

/// Response of `GET /tickets/stats/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketStats {
    #[serde(default)]
    pub total_tickets: u64,
    #[serde(default)]
    pub open_tickets: u64,
    #[serde(default)]
    pub avg_tickets_per_day: f64,
    #[serde(default)]
    pub priority_breakdown: PriorityBreakdown,
    #[serde(default)]
    pub category_breakdown: CategoryBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub high: u64,
    #[serde(default)]
    pub critical: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    #[serde(default)]
    pub billing: u64,
    #[serde(default)]
    pub technical: u64,
    #[serde(default)]
    pub account: u64,
    #[serde(default)]
    pub general: u64,
}

impl PriorityBreakdown {
    pub fn entries(&self) -> [(Priority, u64); 4] {
        [
            (Priority::Low, self.low),
            (Priority::Medium, self.medium),
            (Priority::High, self.high),
            (Priority::Critical, self.critical),
        ]
    }
}

impl CategoryBreakdown {
    pub fn entries(&self) -> [(Category, u64); 4] {
        [
            (Category::Billing, self.billing),
            (Category::Technical, self.technical),
            (Category::Account, self.account),
            (Category::General, self.general),
        ]
    }
}

impl TicketStats {
    /// Largest single breakdown count, at least 1 (used to scale bars)
    pub fn max_breakdown(&self) -> u64 {
        self.priority_breakdown
            .entries()
            .iter()
            .map(|(_, n)| *n)
            .chain(self.category_breakdown.entries().iter().map(|(_, n)| *n))
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats_payload() {
        let stats: TicketStats =
            serde_json::from_str(r#"{"total_tickets": 5, "priority_breakdown": {"high": 3}}"#).unwrap();
        assert_eq!(stats.total_tickets, 5);
        assert_eq!(stats.open_tickets, 0);
        assert_eq!(stats.priority_breakdown.high, 3);
        assert_eq!(stats.max_breakdown(), 3);
    }

    #[test]
    fn test_max_breakdown_floor() {
        assert_eq!(TicketStats::default().max_breakdown(), 1);
    }
}
