//! Fixed-timestep clock.
//!
//! Turns variable frame times into whole simulation ticks of `1 / tick_hz`
//! seconds. Leftover time carries over to the next frame. After a stall, the
//! catch-up is clamped to `max_ticks_per_advance` and the excess is dropped, so
//! a long pause does not produce a burst of ticks.

use std::time::Duration;

use kcc2d::fixed_delta_time;

/// Default cap on ticks produced by one `advance` call.
pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

#[derive(Clone, Debug)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_ticks_per_advance: u32,
}

impl FixedTimestep {
    pub fn new(tick_hz: u32) -> Self {
        Self {
            dt: fixed_delta_time(tick_hz),
            accumulator: 0.0,
            max_ticks_per_advance: MAX_TICKS_PER_ADVANCE,
        }
    }

    pub fn with_max_ticks_per_advance(mut self, max_ticks: u32) -> Self {
        self.max_ticks_per_advance = max_ticks.max(1);
        self
    }

    /// Fixed tick length in seconds.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add `elapsed` wall time and return how many ticks to run now.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.as_secs_f32();

        let available = (self.accumulator / self.dt).floor() as u32;
        let ticks = available.min(self.max_ticks_per_advance);
        if ticks < available {
            log::warn!(
                "fixed timestep fell behind: dropping {} ticks",
                available - ticks
            );
            self.accumulator = 0.0;
        } else {
            self.accumulator -= ticks as f32 * self.dt;
        }

        ticks
    }
}
