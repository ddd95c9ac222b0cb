//! Discrete simulation clock.

use thiserror::Error;

const DEFAULT_TICK_DURATION: f64 = 0.1;
const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;

/// Reasons a clock configuration may be rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ClockError {
    /// The tick duration was zero, negative, or not finite.
    #[error("tick duration must be a positive finite number of seconds, got {value}")]
    InvalidTickDuration {
        /// Rejected duration.
        value: f64,
    },
    /// The speed multiplier was zero, negative, or not finite.
    #[error("speed multiplier must be a positive finite number, got {value}")]
    InvalidSpeedMultiplier {
        /// Rejected multiplier.
        value: f64,
    },
}

/// Owns simulated time and the cadence at which it advances.
///
/// Simulated time is decoupled from wall-clock time: each tick advances by
/// `tick_duration * speed_multiplier` seconds, so training loops can cover
/// many simulated seconds per real step.
#[derive(Clone, Debug, PartialEq)]
pub struct GameClock {
    current_time: f64,
    tick_duration: f64,
    speed_multiplier: f64,
    tick_count: u64,
}

impl GameClock {
    /// Creates a clock at time zero with the provided cadence.
    pub fn new(tick_duration: f64, speed_multiplier: f64) -> Result<Self, ClockError> {
        if !is_positive_finite(tick_duration) {
            return Err(ClockError::InvalidTickDuration {
                value: tick_duration,
            });
        }
        if !is_positive_finite(speed_multiplier) {
            return Err(ClockError::InvalidSpeedMultiplier {
                value: speed_multiplier,
            });
        }

        Ok(Self {
            current_time: 0.0,
            tick_duration,
            speed_multiplier,
            tick_count: 0,
        })
    }

    /// Advances simulated time by one step.
    ///
    /// Callers drive this at most once per simulation step; the clock does not
    /// enforce it.
    pub fn tick(&mut self) {
        self.current_time += self.time_delta();
        self.tick_count = self.tick_count.saturating_add(1);
    }

    /// Simulated seconds covered by one step.
    #[must_use]
    pub fn time_delta(&self) -> f64 {
        self.tick_duration * self.speed_multiplier
    }

    /// Rewinds simulated time to zero, keeping the cadence configuration.
    pub fn reset(&mut self) {
        self.current_time = 0.0;
        self.tick_count = 0;
    }

    /// Simulated seconds elapsed since the last reset.
    #[must_use]
    pub const fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Base duration of a single tick in seconds.
    #[must_use]
    pub const fn tick_duration(&self) -> f64 {
        self.tick_duration
    }

    /// Factor applied to the tick duration.
    #[must_use]
    pub const fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Changes the speed multiplier for subsequent ticks.
    pub fn set_speed_multiplier(&mut self, speed_multiplier: f64) -> Result<(), ClockError> {
        if !is_positive_finite(speed_multiplier) {
            return Err(ClockError::InvalidSpeedMultiplier {
                value: speed_multiplier,
            });
        }
        self.speed_multiplier = speed_multiplier;
        Ok(())
    }

    /// Number of ticks since the last reset.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            tick_duration: DEFAULT_TICK_DURATION,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            tick_count: 0,
        }
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clock_runs_at_ten_ticks_per_second() {
        let clock = GameClock::default();
        assert_eq!(clock.current_time(), 0.0);
        assert_eq!(clock.tick_duration(), 0.1);
        assert_eq!(clock.speed_multiplier(), 1.0);
    }

    #[test]
    fn ticks_accumulate_scaled_duration() {
        let mut clock = GameClock::new(0.25, 2.0).expect("valid clock");
        for _ in 0..8 {
            clock.tick();
        }
        assert_eq!(clock.current_time(), 8.0 * 0.25 * 2.0);
        assert_eq!(clock.tick_count(), 8);
    }

    #[test]
    fn time_delta_does_not_advance_time() {
        let mut clock = GameClock::new(0.5, 3.0).expect("valid clock");
        clock.tick();
        let before = clock.current_time();
        assert_eq!(clock.time_delta(), 1.5);
        assert_eq!(clock.time_delta(), 1.5);
        assert_eq!(clock.current_time(), before);
    }

    #[test]
    fn default_cadence_accumulates_within_tolerance() {
        let mut clock = GameClock::default();
        for _ in 0..100 {
            clock.tick();
        }
        assert!((clock.current_time() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn reset_preserves_cadence() {
        let mut clock = GameClock::new(0.5, 1.0).expect("valid clock");
        clock.set_speed_multiplier(4.0).expect("valid multiplier");
        clock.tick();
        clock.tick();
        clock.reset();

        assert_eq!(clock.current_time(), 0.0);
        assert_eq!(clock.tick_count(), 0);
        assert_eq!(clock.tick_duration(), 0.5);
        assert_eq!(clock.speed_multiplier(), 4.0);
    }

    #[test]
    fn rejects_non_positive_configuration() {
        assert_eq!(
            GameClock::new(0.0, 1.0),
            Err(ClockError::InvalidTickDuration { value: 0.0 })
        );
        assert_eq!(
            GameClock::new(0.1, -2.0),
            Err(ClockError::InvalidSpeedMultiplier { value: -2.0 })
        );
        assert!(GameClock::new(f64::NAN, 1.0).is_err());
        assert!(GameClock::new(0.1, f64::INFINITY).is_err());
    }

    #[test]
    fn rejected_speed_change_keeps_previous_multiplier() {
        let mut clock = GameClock::default();
        assert!(clock.set_speed_multiplier(0.0).is_err());
        assert_eq!(clock.speed_multiplier(), 1.0);
    }
}
