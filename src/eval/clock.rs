use std::{cell::Cell, time::Instant};

/// Source of show time in seconds.
///
/// A frame reads the clock once and evaluates every entry and every monitor
/// against that single value.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

/// Wall clock anchored at construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(now: f64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, by: f64) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_secs(&self) -> f64 {
        (**self).now_secs()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/clock.rs"]
mod tests;
