use std::{fmt, time::SystemTime};

use crate::time_control::TimeControl;

/// Time left, as shown in the stats bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Seconds(u64),
    Unbounded,
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::Seconds(secs) => write!(f, "{secs}"),
            Remaining::Unbounded => write!(f, "∞"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running { started_at: SystemTime },
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub remaining: Remaining,
    /// set on the single tick that ran the countdown out
    pub expired: bool,
}

/// Repeating countdown driven by the host's tick events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    time_control: TimeControl,
    state: CountdownState,
}

impl Countdown {
    pub fn new(time_control: TimeControl) -> Self {
        Self {
            time_control,
            state: CountdownState::Idle,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    /// Arms the countdown; ignored unless it is still idle
    pub fn start(&mut self, now: SystemTime) {
        if self.state == CountdownState::Idle {
            self.state = CountdownState::Running { started_at: now };
        }
    }

    pub fn cancel(&mut self) {
        self.state = CountdownState::Cancelled;
    }

    pub fn remaining(&self, now: SystemTime) -> Remaining {
        let Some(limit) = self.time_control.as_secs() else {
            return Remaining::Unbounded;
        };
        match self.state {
            CountdownState::Idle => Remaining::Seconds(limit),
            CountdownState::Running { started_at } => {
                let elapsed = now.duration_since(started_at).unwrap_or_default().as_secs();
                Remaining::Seconds(limit.saturating_sub(elapsed))
            }
            CountdownState::Cancelled => Remaining::Seconds(0),
        }
    }

    pub fn tick(&mut self, now: SystemTime) -> Tick {
        if !self.is_running() {
            return Tick {
                remaining: self.frozen_remaining(),
                expired: false,
            };
        }

        let remaining = self.remaining(now);
        let expired = remaining == Remaining::Seconds(0);
        if expired {
            self.cancel();
        }
        Tick { remaining, expired }
    }

    fn frozen_remaining(&self) -> Remaining {
        match (self.time_control, self.state) {
            (TimeControl::Unbounded, _) => Remaining::Unbounded,
            (TimeControl::Seconds(secs), CountdownState::Idle) => Remaining::Seconds(secs),
            (TimeControl::Seconds(_), _) => Remaining::Seconds(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_idle_countdown_shows_full_duration() {
        let mut countdown = Countdown::new(TimeControl::Seconds(15));

        let tick = countdown.tick(SystemTime::now());

        assert_eq!(tick.remaining, Remaining::Seconds(15));
        assert!(!tick.expired);
    }

    #[test]
    fn test_counts_down_whole_seconds() {
        let t0 = SystemTime::now();
        let mut countdown = Countdown::new(TimeControl::Seconds(15));
        countdown.start(t0);

        assert_eq!(countdown.tick(t0 + Duration::from_millis(250)).remaining, Remaining::Seconds(15));
        assert_eq!(countdown.tick(t0 + Duration::from_millis(1_000)).remaining, Remaining::Seconds(14));
        assert_eq!(countdown.tick(t0 + Duration::from_millis(14_750)).remaining, Remaining::Seconds(1));
    }

    #[test]
    fn test_expires_exactly_once() {
        let t0 = SystemTime::now();
        let mut countdown = Countdown::new(TimeControl::Seconds(2));
        countdown.start(t0);

        let expirations = (1..=20)
            .map(|i| countdown.tick(t0 + Duration::from_millis(250 * i)))
            .filter(|t| t.expired)
            .count();

        assert_eq!(expirations, 1);
        assert_eq!(countdown.state(), CountdownState::Cancelled);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let t0 = SystemTime::now();
        let mut countdown = Countdown::new(TimeControl::Seconds(5));
        countdown.start(t0);

        countdown.cancel();
        countdown.cancel();

        assert!(!countdown.tick(t0 + Duration::from_secs(10)).expired);
        assert_eq!(countdown.state(), CountdownState::Cancelled);
    }

    #[test]
    fn test_start_after_cancel_is_ignored() {
        let t0 = SystemTime::now();
        let mut countdown = Countdown::new(TimeControl::Seconds(5));
        countdown.cancel();
        countdown.start(t0);

        assert!(!countdown.is_running());
    }

    #[test]
    fn test_unbounded_never_expires() {
        let t0 = SystemTime::now();
        let mut countdown = Countdown::new(TimeControl::Unbounded);
        countdown.start(t0);

        let tick = countdown.tick(t0 + Duration::from_secs(86_400));

        assert_eq!(tick.remaining, Remaining::Unbounded);
        assert!(!tick.expired);
        assert!(countdown.is_running());
        assert_eq!(Remaining::Unbounded.to_string(), "∞");
    }
}
