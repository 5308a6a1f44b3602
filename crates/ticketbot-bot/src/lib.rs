//! # Ticketbot
//!
//! Discord bot whose commands are throttled by a persistent cooldown registry.
//!
//! This is the main binary crate that wires configuration, logging, the
//! cooldown registry and the Poise framework together.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod lifecycle;

pub use bot::*;
pub use error::*;
pub use lifecycle::*;
