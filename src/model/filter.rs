use serde::{Deserialize, Serialize};

use super::ticket::{Category, Priority, Status};

/// List filter criteria. `None` means "no constraint" for that key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Set the search term. Blank input clears the constraint.
    pub fn set_search(&mut self, search: &str) {
        let trimmed = search.trim();
        self.search = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Number of keys that currently constrain the list
    pub fn active_count(&self) -> usize {
        [
            self.category.is_some(),
            self.priority.is_some(),
            self.status.is_some(),
            self.search.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Query parameters for `GET /tickets/`, only for keys that are set
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.as_str().to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Step through `None` followed by each value of `all`, wrapping around.
/// `forward = false` walks the other way.
pub fn cycle_option<T: Copy + PartialEq>(current: Option<T>, all: &[T], forward: bool) -> Option<T> {
    let len = all.len() + 1;
    let pos = match current {
        None => 0,
        Some(value) => all.iter().position(|v| *v == value).map_or(0, |i| i + 1),
    };
    let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
    if next == 0 { None } else { Some(all[next - 1]) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_search_is_absent() {
        let mut filters = FilterCriteria::default();
        filters.set_search("   ");
        assert_eq!(filters.search, None);
        filters.set_search(" refund ");
        assert_eq!(filters.search.as_deref(), Some("refund"));
    }

    #[test]
    fn test_query_pairs_only_for_set_keys() {
        let filters = FilterCriteria {
            priority: Some(Priority::High),
            search: Some("login".into()),
            ..Default::default()
        };
        assert_eq!(
            filters.query_pairs(),
            vec![("priority", "high".to_string()), ("search", "login".to_string())]
        );
        assert_eq!(filters.active_count(), 2);
        assert!(FilterCriteria::default().query_pairs().is_empty());
    }

    #[test]
    fn test_cycle_option_wraps_through_none() {
        let all = Status::ALL;
        assert_eq!(cycle_option(None, &all, true), Some(Status::Open));
        assert_eq!(cycle_option(Some(Status::Closed), &all, true), None);
        assert_eq!(cycle_option(None, &all, false), Some(Status::Closed));
        assert_eq!(cycle_option(Some(Status::Open), &all, false), None);
    }
}
