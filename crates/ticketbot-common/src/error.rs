//! Application-wide error type.

use thiserror::Error;

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, TicketbotError>;

/// Application-wide error type.
#[derive(Error, Debug)]
pub enum TicketbotError {
    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong.
        message: String,
        /// Underlying cause, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl TicketbotError {
    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}
