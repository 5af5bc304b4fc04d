use serde::{Serialize, Deserialize};

/// Cyclic time-of-day counter driving the sky schedule.
///
/// `time` stays in `[0, day_length)` after every advance. Reaching or
/// crossing the end of the day wraps back to 0 and bumps the day
/// counter; the overflow beyond the boundary is discarded, not carried
/// into the new day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    time: f32,
    day_length: f32,
    day: u32,
}

impl Clock {
    pub fn new(time: f32, day_length: f32, day: u32) -> Self {
        Self {
            time,
            day_length,
            day,
        }
    }

    /// Advance by a signed step.
    ///
    /// Wrapping is one day per call regardless of the step magnitude:
    /// overflow lands on 0 with the excess dropped, underflow (reverse
    /// playback) wraps modularly into the previous day.
    pub fn advance(&mut self, step: f32) {
        self.time += step;
        if self.time >= self.day_length {
            self.time = 0.0;
            self.day = self.day.wrapping_add(1);
        } else if self.time < 0.0 {
            self.time = self.time.rem_euclid(self.day_length);
            self.day = self.day.saturating_sub(1);
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn day_length(&self) -> f32 {
        self.day_length
    }

    /// Progress through the current day in [0, 1).
    pub fn day_fraction(&self) -> f32 {
        self.time / self.day_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_and_wrap() {
        let mut clock = Clock::new(2398.0, 2400.0, 0);

        clock.advance(1.0);
        assert_eq!(clock.time(), 2399.0);
        assert_eq!(clock.day(), 0);

        clock.advance(1.0);
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.day(), 1);
    }

    #[test]
    fn test_overflow_is_discarded() {
        // Excess beyond the boundary does not carry into the new day.
        let mut clock = Clock::new(2395.0, 2400.0, 3);
        clock.advance(50.0);
        assert_eq!(clock.time(), 0.0);
        assert_eq!(clock.day(), 4);
    }

    #[test]
    fn test_invariant_holds_under_sweep() {
        let mut clock = Clock::new(7.0, 100.0, 0);
        for _ in 0..1000 {
            clock.advance(3.0);
            assert!(clock.time() >= 0.0);
            assert!(clock.time() < clock.day_length());
        }
        assert!(clock.day() > 0);
    }

    #[test]
    fn test_reverse_playback() {
        let mut clock = Clock::new(5.0, 2400.0, 2);
        clock.advance(-10.0);
        assert_eq!(clock.time(), 2395.0);
        assert_eq!(clock.day(), 1);

        // The day counter never goes below zero.
        let mut clock = Clock::new(1.0, 2400.0, 0);
        clock.advance(-2.0);
        assert_eq!(clock.day(), 0);
        assert!(clock.time() >= 0.0 && clock.time() < 2400.0);
    }
}
