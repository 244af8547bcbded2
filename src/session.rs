use std::time::SystemTime;

use tracing::debug;

use crate::{stats::Summary, time_control::TimeControl, word_generator::TokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStatus {
    Untouched,
    InProgress,
    Submitted,
}

/// One prompt word together with what the user typed for it
#[derive(Debug, Clone, PartialEq)]
pub struct WordSlot {
    pub expected: String,
    pub typed: String,
    pub status: WordStatus,
}

impl WordSlot {
    pub fn new(expected: String) -> Self {
        Self {
            expected,
            typed: String::new(),
            status: WordStatus::Untouched,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.status == WordStatus::Submitted
    }

    /// Status a word falls back to when it is not submitted
    pub(crate) fn editing_status(&self) -> WordStatus {
        if self.typed.is_empty() {
            WordStatus::Untouched
        } else {
            WordStatus::InProgress
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Idle,
    Running {
        started_at: SystemTime,
    },
    Ended {
        started_at: SystemTime,
        ended_at: SystemTime,
        summary: Summary,
    },
}

/// Phase without its payload, for the view layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PhaseTag {
    Idle,
    Running,
    Ended,
}

impl SessionPhase {
    pub fn tag(&self) -> PhaseTag {
        match self {
            SessionPhase::Idle => PhaseTag::Idle,
            SessionPhase::Running { .. } => PhaseTag::Running,
            SessionPhase::Ended { .. } => PhaseTag::Ended,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    slots: Vec<WordSlot>,
    active: usize,
    phase: SessionPhase,
    time_control: TimeControl,
}

impl Session {
    pub fn new(words: Vec<String>, time_control: TimeControl) -> Self {
        Self {
            slots: words.into_iter().map(WordSlot::new).collect(),
            active: 0,
            phase: SessionPhase::Idle,
            time_control,
        }
    }

    pub fn slots(&self) -> &[WordSlot] {
        &self.slots
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|s| s.expected.as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn typed(&self, idx: usize) -> Option<&str> {
        self.slots.get(idx).map(|s| s.typed.as_str())
    }

    pub fn is_submitted(&self, idx: usize) -> bool {
        self.slots.get(idx).is_some_and(WordSlot::is_submitted)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_slot(&self) -> Option<&WordSlot> {
        self.slots.get(self.active)
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn time_control(&self) -> TimeControl {
        self.time_control
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        match self.phase {
            SessionPhase::Idle => None,
            SessionPhase::Running { started_at } | SessionPhase::Ended { started_at, .. } => {
                Some(started_at)
            }
        }
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 >= self.slots.len()
    }

    /// Append a batch of fresh words in one step
    pub fn extend<S: TokenSource + ?Sized>(&mut self, tokens: &mut S, n: usize) {
        let batch = tokens.batch(n);
        debug!(from = self.slots.len(), added = batch.len(), "extending word list");
        self.slots.extend(batch.into_iter().map(WordSlot::new));
    }

    /// Same prompt, fresh attempt
    pub fn retry(&self) -> Self {
        Self::new(
            self.slots.iter().map(|s| s.expected.clone()).collect(),
            self.time_control,
        )
    }

    pub(crate) fn slot_mut(&mut self, idx: usize) -> Option<&mut WordSlot> {
        self.slots.get_mut(idx)
    }

    pub(crate) fn set_active(&mut self, idx: usize) {
        debug_assert!(idx < self.slots.len(), "active index past the word list");
        self.active = idx;
    }

    /// Idle -> Running; later calls keep the first start
    pub(crate) fn start(&mut self, now: SystemTime) -> bool {
        if self.phase == SessionPhase::Idle {
            self.phase = SessionPhase::Running { started_at: now };
            true
        } else {
            false
        }
    }

    /// Freeze the summary and move to Ended. Returns false if there was
    /// nothing running to end.
    pub fn end(&mut self, now: SystemTime) -> bool {
        let SessionPhase::Running { started_at } = self.phase else {
            return false;
        };
        let summary = Summary::capture(self, started_at, now);
        self.phase = SessionPhase::Ended {
            started_at,
            ended_at: now,
            summary,
        };
        true
    }

    pub fn summary(&self) -> Option<&Summary> {
        match &self.phase {
            SessionPhase::Ended { summary, .. } => Some(summary),
            _ => None,
        }
    }
}
