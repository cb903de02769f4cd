//! Data-loading error types.
//!
//! These errors cover the only fallible boundary in the engine: fetching
//! and validating a quiz definition. Navigation, scoring, and export are
//! total functions over session state and never produce errors.

use thiserror::Error;

/// Errors that can occur while loading a quiz definition.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resource was unreachable or the fetch did not succeed.
    #[error("definition not found: {0}")]
    NotFound(String),

    /// The document could not be parsed or fails structural validation.
    #[error("malformed definition: {0}")]
    Malformed(String),

    /// The document parsed but contains no questions.
    #[error("definition contains no questions")]
    EmptyQuestionSet,
}

impl LoadError {
    /// Returns `true` when the definition document itself is at fault, so a
    /// plain retry of the same resource cannot help.
    pub fn is_data_error(&self) -> bool {
        matches!(self, LoadError::Malformed(_) | LoadError::EmptyQuestionSet)
    }
}
