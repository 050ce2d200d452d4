pub mod countdown;
pub mod slideshow;

pub use countdown::{Countdown, CountdownPhase, CountdownState, COUNTDOWN_TICK};
pub use slideshow::{AdvanceTick, Slideshow, MAX_SLIDES, ROTATION_PERIOD};

use std::time::{Duration, Instant};

/// An owned, cancellable repeating-timer handle.
///
/// Controllers hold one of these in an `Option`; cancelling is dropping the
/// value (setting the option to `None`), so a cancelled timer can never fire
/// again and cancel-before-reschedule is enforced by ownership rather than
/// by convention. The event loop drives it by calling [`poll`](Self::poll)
/// with a current instant.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_fire: Instant,
}

impl Interval {
    /// Start a timer whose first fire is one full period from `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Interval {
            period,
            next_fire: now + period,
        }
    }

    /// Fire at most once per call. When a fire is due, the schedule advances
    /// in whole periods past `now`, so a stalled event loop produces one
    /// late fire instead of a burst of catch-up fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_fire {
            return false;
        }
        while self.next_fire <= now {
            self.next_fire += self.period;
        }
        true
    }

    /// Defer the next fire to one full period from `now`.
    pub fn reset(&mut self, now: Instant) {
        self.next_fire = now + self.period;
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let start = Instant::now();
        let mut interval = Interval::new(Duration::from_secs(1), start);

        assert!(!interval.poll(start));
        assert!(!interval.poll(start + Duration::from_millis(999)));
        assert!(interval.poll(start + Duration::from_secs(1)));
        // Already consumed; nothing more until the next period
        assert!(!interval.poll(start + Duration::from_millis(1500)));
        assert!(interval.poll(start + Duration::from_secs(2)));
    }

    #[test]
    fn missed_periods_collapse_into_one_fire() {
        let start = Instant::now();
        let mut interval = Interval::new(Duration::from_secs(1), start);

        // Event loop stalled for five periods: one fire, then back on cadence
        assert!(interval.poll(start + Duration::from_secs(5)));
        assert!(!interval.poll(start + Duration::from_millis(5500)));
        assert!(interval.poll(start + Duration::from_secs(6)));
    }

    #[test]
    fn reset_defers_a_full_period() {
        let start = Instant::now();
        let mut interval = Interval::new(Duration::from_secs(10), start);

        let mid = start + Duration::from_secs(9);
        interval.reset(mid);
        // The original deadline passes silently
        assert!(!interval.poll(start + Duration::from_secs(10)));
        assert!(interval.poll(mid + Duration::from_secs(10)));
    }
}
