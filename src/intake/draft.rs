use crate::model::{Category, Priority, Ticket, TicketId};

use super::classify::Suggestion;
use super::touch::{SuggestibleField, TouchTracker};

/// A user-driven change to a suggestible field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Category(Category),
    Priority(Priority),
}

impl FieldValue {
    pub fn field(self) -> SuggestibleField {
        match self {
            FieldValue::Category(_) => SuggestibleField::Category,
            FieldValue::Priority(_) => SuggestibleField::Priority,
        }
    }
}

/// The ticket being composed in the intake form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub touched: TouchTracker,
    /// Set while the draft edits an existing ticket
    pub editing: Option<TicketId>,
}

impl FormDraft {
    /// Draft pre-filled from an existing ticket. Its category and priority
    /// were chosen already, so suggestions leave them alone. Unrecognised
    /// values are dropped and fall back to the submit baseline.
    pub fn from_ticket(ticket: &Ticket) -> Self {
        let mut touched = TouchTracker::default();
        touched.touch_all();
        FormDraft {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            category: Some(ticket.category).filter(|c| c.is_known()),
            priority: Some(ticket.priority).filter(|p| p.is_known()),
            touched,
            editing: Some(ticket.id.clone()),
        }
    }

    /// Explicit user choice: always applies and marks the field touched
    pub fn set_field(&mut self, value: FieldValue) {
        match value {
            FieldValue::Category(c) => self.category = Some(c),
            FieldValue::Priority(p) => self.priority = Some(p),
        }
        self.touched.touch(value.field());
    }

    /// Fill a field from a suggestion unless the user has touched it or
    /// the classifier returned a value we don't recognise.
    /// Returns whether the draft changed.
    pub fn apply_suggestion(&mut self, value: FieldValue) -> bool {
        if self.touched.is_touched(value.field()) {
            return false;
        }
        match value {
            FieldValue::Category(c) if c.is_known() => self.category = Some(c),
            FieldValue::Priority(p) if p.is_known() => self.priority = Some(p),
            _ => return false,
        }
        true
    }

    /// Apply both halves of a classification, each gated separately
    pub fn merge(&mut self, suggestion: &Suggestion) {
        self.apply_suggestion(FieldValue::Category(suggestion.category));
        self.apply_suggestion(FieldValue::Priority(suggestion.priority));
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn reset(&mut self) {
        *self = FormDraft::default();
    }
}
