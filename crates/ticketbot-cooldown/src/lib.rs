//! # Ticketbot Cooldown
//!
//! In-process registry of expiring keys ("cooldowns") used to throttle
//! commands, with optional persistence across restarts.
//!
//! The registry is assembled from four pieces:
//!
//! - [`store::CooldownStore`]: authoritative `key -> expiry` map.
//! - [`timer::TimerScheduler`]: one Tokio task per key that fires on expiry,
//!   chaining sleeps when a cooldown outlives the maximum single-timer delay.
//! - [`snapshot::SnapshotStore`]: JSON mirror of persisted keys with
//!   coalesced writes.
//! - [`events::EventNotifier`]: `started` / `expired` / `deleted` fan-out.
//!
//! [`CooldownRegistry`] is the validated facade over all of them.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use ticketbot_cooldown::{CooldownDuration, CooldownRegistry, CooldownSettings, LeftFormat};
//! # use ticketbot_i18n::Messages;
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = CooldownRegistry::new(CooldownSettings::default(), Arc::new(Messages::load()?));
//! registry.set("ping:545154148069408768", CooldownDuration::seconds(10), false)?;
//! assert!(registry.has("ping:545154148069408768")?);
//! println!("{}", registry.left("ping:545154148069408768", LeftFormat::Text)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod duration;
pub mod error;
pub mod events;
pub mod format;
pub mod registry;
pub mod snapshot;
pub mod store;
pub mod timer;

pub use clock::{Clock, SystemClock, TokioClock};
pub use duration::{CooldownDuration, MAX_COOLDOWN_SECS, MAX_TIMER_DELAY};
pub use error::{CooldownError, PersistenceError, Result};
pub use events::{CooldownEvent, CooldownRecord, EventKind};
pub use format::LeftFormat;
pub use registry::{CooldownRegistry, CooldownSettings};
