use std::time::SystemTime;

use tracing::{debug, info};

use crate::{
    session::{PhaseTag, Session, SessionPhase},
    snapshot::Snapshot,
    stats::Stats,
    time_control::TimeControl,
    time_series::WpmSeries,
    timer::{Countdown, Remaining},
    typing_policy::{reduce, KeyAction},
    word_generator::{TokenSource, WordGenerator, INITIAL_BATCH},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub remaining: Remaining,
    /// true only on the tick that ended the session
    pub ended: bool,
}

/// Owns the one live session and everything that mutates it.
///
/// Key events and ticks are applied one at a time; a snapshot taken after
/// either call always sees the fully updated session.
pub struct Practice<S: TokenSource = WordGenerator> {
    session: Session,
    tokens: S,
    countdown: Countdown,
    wpm_series: WpmSeries,
}

impl<S: TokenSource> Practice<S> {
    pub fn new(mut tokens: S, time_control: TimeControl) -> Self {
        let words = tokens.batch(INITIAL_BATCH);
        Self::with_words(words, tokens, time_control)
    }

    pub fn with_words(words: Vec<String>, tokens: S, time_control: TimeControl) -> Self {
        Self {
            session: Session::new(words, time_control),
            tokens,
            countdown: Countdown::new(time_control),
            wpm_series: WpmSeries::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn wpm_series(&self) -> &WpmSeries {
        &self.wpm_series
    }

    pub fn time_control(&self) -> TimeControl {
        self.session.time_control()
    }

    pub fn phase(&self) -> PhaseTag {
        self.session.phase().tag()
    }

    pub fn on_key(&mut self, action: KeyAction, now: SystemTime) {
        let was_idle = self.phase() == PhaseTag::Idle;
        let time_control = self.time_control();
        let current = std::mem::replace(&mut self.session, Session::new(Vec::new(), time_control));
        self.session = reduce(current, action, now, &mut self.tokens);

        if was_idle {
            if let Some(started_at) = self.session.started_at() {
                info!(time_control = %self.time_control(), "session started");
                self.countdown.start(started_at);
            }
        }
    }

    pub fn on_tick(&mut self, now: SystemTime) -> TickReport {
        let tick = self.countdown.tick(now);

        if let SessionPhase::Running { started_at } = self.session.phase() {
            let second = now.duration_since(*started_at).unwrap_or_default().as_secs();
            let wpm = Stats::compute(&self.session, now).wpm;
            self.wpm_series.record(second, wpm);
        }

        let ended = tick.expired && self.end_session(now);
        TickReport {
            remaining: tick.remaining,
            ended,
        }
    }

    /// Ends a running session on request, e.g. an unbounded one
    pub fn finish(&mut self, now: SystemTime) -> bool {
        self.end_session(now)
    }

    fn end_session(&mut self, now: SystemTime) -> bool {
        if !self.session.end(now) {
            return false;
        }
        self.countdown.cancel();
        if let Some(summary) = self.session.summary() {
            info!(
                wpm = summary.wpm,
                accuracy = summary.accuracy,
                correct_words = summary.correct_words,
                incorrect_words = summary.incorrect_words,
                typed_letters = summary.typed_letters,
                "session ended"
            );
        }
        true
    }

    /// Fresh word list, counters zeroed
    pub fn restart(&mut self) {
        self.reset(self.time_control(), None);
        debug!("session restarted");
    }

    /// Same word list, fresh attempt
    pub fn retry(&mut self) {
        let session = self.session.retry();
        self.reset(self.time_control(), Some(session));
        debug!("session retried");
    }

    pub fn set_time_control(&mut self, time_control: TimeControl) {
        info!(%time_control, "time control changed");
        self.reset(time_control, None);
    }

    fn reset(&mut self, time_control: TimeControl, session: Option<Session>) {
        self.countdown.cancel();
        self.session = session.unwrap_or_else(|| {
            Session::new(self.tokens.batch(INITIAL_BATCH), time_control)
        });
        self.countdown = Countdown::new(time_control);
        self.wpm_series.clear();
    }

    pub fn snapshot(&self, now: SystemTime) -> Snapshot<'_> {
        let summary = self.session.summary().copied();
        let remaining = match (&summary, self.time_control()) {
            (Some(_), TimeControl::Unbounded) => Remaining::Unbounded,
            (Some(summary), TimeControl::Seconds(limit)) => {
                Remaining::Seconds(limit.saturating_sub(summary.elapsed_secs))
            }
            (None, _) => self.countdown.remaining(now),
        };

        Snapshot {
            session: &self.session,
            phase: self.phase(),
            stats: Stats::compute(&self.session, now),
            remaining,
            summary,
            wpm_series: self.wpm_series.points(),
        }
    }
}
