//! Error types for the cooldown registry.

use std::path::PathBuf;
use thiserror::Error;
use ticketbot_i18n::I18nError;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, CooldownError>;

/// Errors surfaced synchronously to registry callers
#[derive(Error, Debug)]
pub enum CooldownError {
    /// A parameter had the wrong shape
    #[error("Invalid parameter `{param}` in {function}: received {received}, expected {expected}")]
    Validation {
        /// Operation signature, e.g. `set(key, duration)`
        function: &'static str,
        /// Offending parameter
        param: &'static str,
        /// Rendering of the received value
        received: String,
        /// Description of the accepted shape
        expected: String,
    },

    /// A key contains a character reserved by the snapshot encoding
    #[error("Invalid character in `{param}` of {function}: received {received}, must not contain any of {reserved:?}")]
    ReservedCharacter {
        /// Operation signature
        function: &'static str,
        /// Offending parameter
        param: &'static str,
        /// Rendering of the received value
        received: String,
        /// Forbidden characters
        reserved: &'static [char],
    },

    /// Unknown event kind name
    #[error("Invalid `{param}`: received {received}, expected one of {expected}")]
    Configuration {
        /// Offending parameter
        param: &'static str,
        /// Rendering of the received value
        received: String,
        /// Accepted names
        expected: String,
    },

    /// The remaining-time text could not be localized
    #[error("Localization failed: {0}")]
    Localization(#[from] I18nError),
}

/// Snapshot file failures.
///
/// These never reach registry callers: they are logged and the registry keeps
/// working without durability.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Reading, writing or deleting the snapshot failed
    #[error("Snapshot I/O failed for {path}: {source}")]
    Io {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The snapshot exists but is not a `key -> seconds` JSON object
    #[error("Snapshot {path} is corrupt: {source}")]
    Corrupt {
        /// Snapshot path
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory snapshot could not be serialized
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}
