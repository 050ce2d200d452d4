use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::Interval;

/// Countdown recompute period.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// A countdown snapshot, recomputed every tick. Derived state, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub total_ms: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownState {
    /// The terminal snapshot, emitted once the target has passed.
    pub const ZERO: CountdownState = CountdownState {
        total_ms: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };
}

/// Where the countdown is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    /// No target date.
    Idle,
    /// Ticking toward a target.
    Running,
    /// Target reached; the ticker is cancelled for good.
    Elapsed,
}

/// Compute the remaining time from `now` until midnight on `target`.
pub fn compute_countdown(target: NaiveDate, now: NaiveDateTime) -> CountdownState {
    let midnight = target.and_time(NaiveTime::MIN);
    let total_ms = (midnight - now).num_milliseconds();
    CountdownState {
        total_ms,
        days: total_ms / MS_PER_DAY,
        hours: (total_ms % MS_PER_DAY) / MS_PER_HOUR,
        minutes: (total_ms % MS_PER_HOUR) / MS_PER_MINUTE,
        seconds: (total_ms % MS_PER_MINUTE) / MS_PER_SECOND,
    }
}

/// The countdown ticker: at most one timer alive, cancelled before every
/// restart and permanently once the target passes.
#[derive(Debug, Default)]
pub struct Countdown {
    target: Option<NaiveDate>,
    ticker: Option<Interval>,
    state: Option<CountdownState>,
    elapsed: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Countdown::default()
    }

    pub fn target(&self) -> Option<NaiveDate> {
        self.target
    }

    /// The latest snapshot, if a tick has happened since the last re-target.
    pub fn state(&self) -> Option<CountdownState> {
        self.state
    }

    pub fn phase(&self) -> CountdownPhase {
        if self.target.is_none() {
            CountdownPhase::Idle
        } else if self.elapsed {
            CountdownPhase::Elapsed
        } else {
            CountdownPhase::Running
        }
    }

    /// Re-target the countdown. Any running ticker is cancelled first, so
    /// re-entering from Running or Elapsed never leaves two timers alive.
    /// `None` (no date) lands in Idle with no timer.
    pub fn set_target(&mut self, target: Option<NaiveDate>, now: Instant) {
        self.ticker = None;
        self.state = None;
        self.elapsed = false;
        self.target = target;
        if target.is_some() {
            self.ticker = Some(Interval::new(COUNTDOWN_TICK, now));
        }
    }

    /// Drive the ticker. Returns true when a new snapshot was emitted.
    pub fn poll(&mut self, now: Instant, wall: NaiveDateTime) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let Some(ticker) = &mut self.ticker else {
            return false;
        };
        if !ticker.poll(now) {
            return false;
        }

        let snapshot = compute_countdown(target, wall);
        if snapshot.total_ms < 0 {
            // Terminal: cancel the ticker and emit exact zeros, once.
            self.ticker = None;
            self.elapsed = true;
            self.state = Some(CountdownState::ZERO);
        } else {
            self.state = Some(snapshot);
        }
        true
    }

    /// Cancel the ticker unconditionally.
    pub fn teardown(&mut self) {
        self.ticker = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn computes_remaining_fields() {
        // 2 days, 3 hours, 4 minutes, 5 seconds before the wedding
        let now = at(2030, 6, 11, 20, 55, 55);
        let state = compute_countdown(date(2030, 6, 14), now);
        assert_eq!(state.days, 2);
        assert_eq!(state.hours, 3);
        assert_eq!(state.minutes, 4);
        assert_eq!(state.seconds, 5);
        assert!(state.total_ms > 0);
    }

    #[test]
    fn no_target_stays_idle() {
        let mut countdown = Countdown::new();
        let start = Instant::now();
        countdown.set_target(None, start);
        assert_eq!(countdown.phase(), CountdownPhase::Idle);
        assert!(!countdown.poll(start + Duration::from_secs(5), at(2030, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn ticks_once_per_second() {
        let mut countdown = Countdown::new();
        let start = Instant::now();
        countdown.set_target(Some(date(2030, 6, 14)), start);
        assert_eq!(countdown.phase(), CountdownPhase::Running);
        assert!(countdown.state().is_none());

        let wall = at(2030, 6, 10, 12, 0, 0);
        assert!(!countdown.poll(start, wall));
        assert!(countdown.poll(start + Duration::from_secs(1), wall));
        assert_eq!(countdown.state().unwrap().days, 3);
        // Same instant: the tick was already consumed
        assert!(!countdown.poll(start + Duration::from_secs(1), wall));
    }

    #[test]
    fn past_target_emits_exact_zeros_and_stops() {
        let mut countdown = Countdown::new();
        let start = Instant::now();
        countdown.set_target(Some(date(2030, 6, 14)), start);

        // One second after the stroke of midnight
        let wall = at(2030, 6, 14, 0, 0, 1);
        assert!(countdown.poll(start + Duration::from_secs(1), wall));
        assert_eq!(countdown.state(), Some(CountdownState::ZERO));
        assert_eq!(countdown.phase(), CountdownPhase::Elapsed);

        // No further ticks, ever
        for i in 2..10 {
            assert!(!countdown.poll(start + Duration::from_secs(i), wall));
        }
        assert_eq!(countdown.state(), Some(CountdownState::ZERO));
    }

    #[test]
    fn rapid_retargeting_leaves_one_live_timer() {
        let mut countdown = Countdown::new();
        let start = Instant::now();
        for day in 10..15 {
            countdown.set_target(Some(date(2030, 6, day)), start);
        }

        // Exactly one state update per synthetic tick
        let wall = at(2030, 6, 1, 0, 0, 0);
        assert!(countdown.poll(start + Duration::from_secs(1), wall));
        assert!(!countdown.poll(start + Duration::from_secs(1), wall));
        assert!(countdown.poll(start + Duration::from_secs(2), wall));
        assert!(!countdown.poll(start + Duration::from_secs(2), wall));
        assert_eq!(countdown.target(), Some(date(2030, 6, 14)));
    }

    #[test]
    fn retarget_from_elapsed_restarts() {
        let mut countdown = Countdown::new();
        let start = Instant::now();
        countdown.set_target(Some(date(2030, 1, 1)), start);
        countdown.poll(start + Duration::from_secs(1), at(2030, 1, 2, 0, 0, 0));
        assert_eq!(countdown.phase(), CountdownPhase::Elapsed);

        countdown.set_target(Some(date(2030, 6, 14)), start + Duration::from_secs(2));
        assert_eq!(countdown.phase(), CountdownPhase::Running);
        assert!(countdown.poll(start + Duration::from_secs(3), at(2030, 6, 10, 0, 0, 0)));
        assert_eq!(countdown.state().unwrap().days, 4);
    }

    #[test]
    fn teardown_cancels_ticker() {
        let mut countdown = Countdown::new();
        let start = Instant::now();
        countdown.set_target(Some(date(2030, 6, 14)), start);
        countdown.teardown();
        assert!(!countdown.poll(start + Duration::from_secs(5), at(2030, 6, 1, 0, 0, 0)));
    }
}
