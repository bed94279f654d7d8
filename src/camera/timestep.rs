use web_time::{Duration, Instant};

/// Camera integration rate, independent of the render frame rate.
pub const TICK_RATE_HZ: u32 = 60;
/// Seconds per camera tick.
pub const TICK_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
/// Upper bound on ticks run for one [`FixedTimestep::advance`] call.
/// Time beyond this after a stall is dropped instead of replayed.
pub const MAX_TICKS_PER_ADVANCE: u32 = 8;

/// Fixed-timestep accumulator.
///
/// Collects real elapsed time and hands out whole ticks of
/// [`TICK_DT`] seconds, so the camera advances at the same rate whether
/// frames come at 30, 60 or 144 Hz.
pub struct FixedTimestep {
    /// Duration of one tick
    step: Duration,
    /// Last time `advance` was called
    last: Instant,
    /// Unconsumed time carried into the next call
    accumulator: Duration,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK_RATE_HZ)
    }
}

impl FixedTimestep {
    /// Timer ticking `rate_hz` times per second (clamped to at least 1).
    #[must_use]
    pub fn new(rate_hz: u32) -> Self {
        Self {
            step: Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1))),
            last: Instant::now(),
            accumulator: Duration::ZERO,
        }
    }

    /// Seconds per tick.
    #[must_use]
    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Number of ticks due now.
    pub fn advance(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        self.accumulate(elapsed)
    }

    /// Add `elapsed` and return the number of whole ticks it completes.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
            if ticks == MAX_TICKS_PER_ADVANCE {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_ticks_only() {
        let mut timer = FixedTimestep::new(10);
        assert_eq!(timer.accumulate(Duration::from_millis(50)), 0);
        assert_eq!(timer.accumulate(Duration::from_millis(50)), 1);
        assert_eq!(timer.accumulate(Duration::from_millis(300)), 3);
    }

    #[test]
    fn remainder_carries_over() {
        let mut timer = FixedTimestep::new(10);
        assert_eq!(timer.accumulate(Duration::from_millis(150)), 1);
        assert_eq!(timer.accumulate(Duration::from_millis(50)), 1);
        assert_eq!(timer.accumulate(Duration::from_millis(99)), 0);
    }

    #[test]
    fn stalls_are_capped() {
        let mut timer = FixedTimestep::default();
        assert_eq!(
            timer.accumulate(Duration::from_secs(5)),
            MAX_TICKS_PER_ADVANCE
        );
        assert_eq!(timer.accumulate(Duration::ZERO), 0);
    }

    #[test]
    fn tick_constant_matches_rate() {
        assert!((FixedTimestep::default().step_secs() - TICK_DT).abs() < 1e-6);
    }
}
