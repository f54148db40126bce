//! Ticket intake: the form, its debounced classification and submission.

pub mod classify;
pub mod controller;
pub mod debounce;
pub mod draft;
pub mod touch;
pub mod validate;

pub use classify::{ClassificationPipeline, Suggestion};
pub use controller::{Acknowledgement, IntakeController, IntakeEvent, IntakeStatus, Notice};
pub use debounce::{DebounceTimer, DebounceToken};
pub use draft::{FieldValue, FormDraft};
pub use touch::{SuggestibleField, TouchTracker};
pub use validate::ValidationError;
