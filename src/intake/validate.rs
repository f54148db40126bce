use crate::model::{Category, NewTicket, Priority};

use super::draft::FormDraft;

pub const TITLE_MAX_CHARS: usize = 200;

/// Local checks that block a submission before anything is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Title must not exceed 200 characters")]
    TitleTooLong,
    #[error("Description is required")]
    MissingDescription,
}

/// Check the draft and build the request body, filling in the
/// general/medium baseline for fields nobody set (or set to a value the
/// backend wouldn't accept).
pub fn validate(draft: &FormDraft) -> Result<NewTicket, ValidationError> {
    let title = validate_title(&draft.title)?;
    let description = draft.description.trim();
    if description.is_empty() {
        return Err(ValidationError::MissingDescription);
    }

    Ok(NewTicket {
        title: title.to_string(),
        description: description.to_string(),
        category: draft
            .category
            .filter(|c| c.is_known())
            .unwrap_or(Category::General),
        priority: draft
            .priority
            .filter(|p| p.is_known())
            .unwrap_or(Priority::Medium),
    })
}

/// Trimmed title, or why it can't be used
pub fn validate_title(title: &str) -> Result<&str, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(title)
}
