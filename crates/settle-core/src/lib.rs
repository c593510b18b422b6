//! # Settling text
//!
//! Settle fades freshly inserted text in: new characters start de-emphasized
//! and return to their normal look over a configurable duration. The crate
//! has three pieces that a host editor wires together:
//!
//! - [`RangeTracker`] — the set of time-stamped spans still settling.
//! - [`ProgressRenderer`] — turns those spans into paint instructions.
//! - [`Driver`] — owns both, plus the repeating timer that animates them.
//!
//! ## Wiring a host
//!
//! The host implements the collaborator traits in [`host`] and forwards its
//! edit and timer events:
//!
//! ```rust
//! use settle_core::*;
//!
//! struct Timers;
//! impl TimerHost for Timers {
//!     fn start_repeating(&mut self, _period: Duration) -> Dispose {
//!         Dispose::new(|| {})
//!     }
//! }
//!
//! let clock = TestClock::new();
//! let mut driver = Driver::new(Settings::default(), clock.clone(), Timers);
//!
//! let change = DocChange::insertion(1, 5, 0, "hello".len());
//! driver.on_change(&change);
//! assert_eq!(driver.state(), DriverState::Animating);
//! ```
//!
//! Each timer fire becomes a [`Driver::tick`] call with the host's
//! [`PaintSurface`] and [`ThemeQuery`]. When every span has settled the
//! driver cancels its timer and goes idle until the next insertion.
//!
//! ## Settings
//!
//! [`Settings`] is a plain snapshot. Replace it with
//! [`Driver::replace_settings`]; the next tick sees the new values.

pub mod animation;
pub mod color;
pub mod driver;
pub mod effects;
pub mod host;
pub mod render;
pub mod settings;
pub mod snapshot;
pub mod span;
pub mod tracker;

pub use animation::*;
pub use color::*;
pub use driver::*;
pub use effects::*;
pub use host::*;
pub use render::*;
pub use settings::*;
pub use snapshot::*;
pub use span::*;
pub use tracker::*;
