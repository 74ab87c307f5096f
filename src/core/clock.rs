//! Time sources for the [`crate::Client`].

use std::time::SystemTime;

/// A source of the current time.
///
/// Any `Fn() -> SystemTime` closure is a clock, which keeps tests
/// deterministic without touching global state.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

/// The real wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<F: Fn() -> SystemTime> Clock for F {
    fn now(&self) -> SystemTime {
        self()
    }
}
