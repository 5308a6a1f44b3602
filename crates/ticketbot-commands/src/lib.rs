//! # Ticketbot Commands
//!
//! Discord command implementations using the Poise framework.
//!
//! Commands are throttled through the shared cooldown registry rather than
//! Poise's built-in cooldowns, so moderators can inspect and reset them and
//! they can survive restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cooldown;
pub mod framework;
pub mod gate;
pub mod ping;

pub use framework::*;
