//! Restartable countdown on simulated time
//!
//! Time is passed in explicitly so the same cooldown works under a fixed
//! timestep driver and in tests.

use serde::{Deserialize, Serialize};

/// Countdown used to pace splashes and phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Length of the countdown in seconds (mutable between starts)
    pub duration: f32,
    /// Simulated time of the last `start`
    started_at: f64,
    running: bool,
}

impl Cooldown {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            started_at: 0.0,
            running: false,
        }
    }

    /// Restart from `now`, discarding any progress
    pub fn start(&mut self, now: f64) {
        self.started_at = now;
        self.running = true;
    }

    /// Restart with a new duration
    pub fn start_with(&mut self, now: f64, duration: f32) {
        self.duration = duration;
        self.start(now);
    }

    /// Stop without expiring
    pub fn reset(&mut self) {
        self.running = false;
        self.started_at = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fraction of the duration elapsed, clamped to [0, 1]
    pub fn elapsed_ratio(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let ratio = (now - self.started_at) / self.duration as f64;
        ratio.clamp(0.0, 1.0) as f32
    }

    /// True once a running countdown has reached its duration
    pub fn is_expired(&self, now: f64) -> bool {
        self.running && self.elapsed_ratio(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_not_expired_right_after_start() {
        let mut cooldown = Cooldown::new(5.0);
        cooldown.start(10.0);
        assert!(!cooldown.is_expired(10.0));
        assert_eq!(cooldown.elapsed_ratio(10.0), 0.0);
    }

    #[test]
    fn test_expires_after_duration() {
        let mut cooldown = Cooldown::new(1.0);
        cooldown.start(2.0);
        assert!(!cooldown.is_expired(2.5));
        assert!((cooldown.elapsed_ratio(2.5) - 0.5).abs() < 1e-6);
        assert!(cooldown.is_expired(3.0));
        assert!(cooldown.is_expired(3.1));
        assert_eq!(cooldown.elapsed_ratio(100.0), 1.0);
    }

    #[test]
    fn test_never_started_never_expires() {
        let cooldown = Cooldown::new(1.0);
        assert!(!cooldown.is_expired(1000.0));
    }

    #[test]
    fn test_restart_discards_progress() {
        let mut cooldown = Cooldown::new(5.0);
        cooldown.start(0.0);
        assert!((cooldown.elapsed_ratio(4.0) - 0.8).abs() < 1e-6);

        // Hurt transition: restart mid-countdown with a shorter delay
        cooldown.start_with(4.0, 1.0);
        assert_eq!(cooldown.elapsed_ratio(4.0), 0.0);
        assert!(!cooldown.is_expired(4.5));
        assert!(cooldown.is_expired(5.0));
    }

    #[test]
    fn test_reset_stops() {
        let mut cooldown = Cooldown::new(1.0);
        cooldown.start(0.0);
        cooldown.reset();
        assert!(!cooldown.is_running());
        assert!(!cooldown.is_expired(5.0));
    }

    proptest! {
        #[test]
        fn prop_ratio_monotonic_and_bounded(
            duration in 0.01f32..30.0,
            start in 0.0f64..1000.0,
            steps in proptest::collection::vec(0.0f64..5.0, 1..64),
        ) {
            let mut cooldown = Cooldown::new(duration);
            cooldown.start(start);
            let mut steps = steps;
            steps.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let mut last = 0.0f32;
            for offset in steps {
                let ratio = cooldown.elapsed_ratio(start + offset);
                prop_assert!((0.0..=1.0).contains(&ratio));
                prop_assert!(ratio >= last);
                last = ratio;
            }
        }

        #[test]
        fn prop_expired_past_duration(duration in 0.01f32..30.0, start in 0.0f64..1000.0) {
            let mut cooldown = Cooldown::new(duration);
            cooldown.start(start);
            prop_assert!(!cooldown.is_expired(start));
            prop_assert!(cooldown.is_expired(start + duration as f64 + 0.001));
        }
    }
}
