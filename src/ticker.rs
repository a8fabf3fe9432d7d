//! Tick sources.
//!
//! The tracker never keeps time itself. Before every operation it polls a
//! [`Ticker`] and maps the returned tick onto a bucket index, so the unit of
//! a tick is whatever the source says it is. [`ClockTicker`] counts wall-clock
//! seconds; [`ManualTicker`] is driven by the caller.
//!
//! # Examples
//!
//! ```
//! use accesstrack::ticker::{ManualTicker, Ticker};
//!
//! let ticker = ManualTicker::new(10);
//! assert_eq!(ticker.current_tick(), 10);
//!
//! ticker.advance(5);
//! assert_eq!(ticker.current_tick(), 15);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current tick.
///
/// Ticks are expected to be non-decreasing. A source that goes backwards is
/// tolerated by one bucket; beyond that the ring treats it as a forward jump.
pub trait Ticker: Send + Sync + fmt::Debug {
    /// The current tick.
    fn current_tick(&self) -> u64;
}

/// Whole seconds since the Unix epoch.
///
/// A system clock set before the epoch reports tick `0`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClockTicker;

impl Ticker for ClockTicker {
    fn current_tick(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}

/// Caller-driven tick, for tests and simulations.
#[derive(Debug, Default)]
pub struct ManualTicker {
    tick: AtomicU64,
}

impl ManualTicker {
    /// Start at `tick`.
    #[must_use]
    pub const fn new(tick: u64) -> Self {
        Self {
            tick: AtomicU64::new(tick),
        }
    }

    /// Jump to `tick`.
    pub fn set(&self, tick: u64) {
        self.tick.store(tick, Ordering::Release);
    }

    /// Move forward by `ticks`, returning the new tick.
    pub fn advance(&self, ticks: u64) -> u64 {
        self.tick.fetch_add(ticks, Ordering::AcqRel).wrapping_add(ticks)
    }
}

impl Ticker for ManualTicker {
    fn current_tick(&self) -> u64 {
        self.tick.load(Ordering::Acquire)
    }
}
