//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Instance validation failures are *not* errors: see [`crate::model::Model::validate`].

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Malformed or contradictory declarative input.
    ///
    /// Missing routes, unsupported path converters, mixed body/formData
    /// parameters, multiple discriminators, conflicting model definitions.
    /// Assembly aborts on the first one; no partial document is produced.
    #[from(ignore)]
    #[display("Specification Error: {_0}")]
    Specification(String),

    /// The core was driven incorrectly by its caller.
    #[from(ignore)]
    #[display("Usage Error: {_0}")]
    Usage(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Shorthand for a [`AppError::Specification`] error.
    pub fn spec(message: impl Into<String>) -> Self {
        AppError::Specification(message.into())
    }

    /// Prefixes the message of a specification error with the handler it came from.
    ///
    /// Other variants pass through untouched.
    pub fn in_handler(self, handler: &str) -> Self {
        self.with_context(&format!("Handler '{}'", handler))
    }

    /// Prefixes the message of a specification error with `context`, e.g.
    /// `Model 'User', field 'name'`.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            AppError::Specification(msg) => {
                AppError::Specification(format!("{}: {}", context, msg))
            }
            other => other,
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
