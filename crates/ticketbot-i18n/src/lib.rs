//! # Ticketbot I18n
//!
//! Internationalization support using the Fluent localization system.
//!
//! Locale resources are embedded at compile time (and validated by the
//! build script), so loading a catalogue never touches the file system.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod locale;
pub mod messages;
pub mod resource;
pub mod units;

pub use error::{I18nError, I18nResult};
pub use fluent_bundle::{FluentArgs, FluentValue};
pub use locale::Locale;
pub use messages::Messages;
pub use units::TimeUnit;
