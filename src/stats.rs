use std::time::{Duration, SystemTime};

use itertools::{EitherOrBoth, Itertools};

use crate::{
    session::{Session, SessionPhase, WordSlot},
    time_control::TimeControl,
};

/// Highlight state of a single prompt letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterMark {
    Correct,
    Wrong,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordVerdict {
    Correct,
    Incorrect,
}

/// Per-letter classification of one word
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetterMarks {
    /// one entry per expected letter
    pub letters: Vec<(char, LetterMark)>,
    /// typed letters beyond the expected word, always wrong
    pub overflow: Vec<char>,
    pub has_mismatch: bool,
}

/// Any mismatch, including typing past the end, marks every typed letter wrong.
pub fn letter_marks(expected: &str, typed: &str) -> LetterMarks {
    let typed_len = typed.chars().count();
    let expected_len = expected.chars().count();
    let has_mismatch =
        typed_len > expected_len || typed.chars().zip(expected.chars()).any(|(t, e)| t != e);

    let letters = expected
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let mark = if i >= typed_len {
                LetterMark::Neutral
            } else if has_mismatch {
                LetterMark::Wrong
            } else {
                LetterMark::Correct
            };
            (c, mark)
        })
        .collect();

    LetterMarks {
        letters,
        overflow: typed.chars().skip(expected_len).collect(),
        has_mismatch,
    }
}

/// Final verdict for submitted words, live hint for a mistyped word in progress
pub fn word_verdict(slot: &WordSlot) -> Option<WordVerdict> {
    if slot.is_submitted() {
        if slot.typed == slot.expected {
            Some(WordVerdict::Correct)
        } else {
            Some(WordVerdict::Incorrect)
        }
    } else if !slot.typed.is_empty() && letter_marks(&slot.expected, &slot.typed).has_mismatch {
        Some(WordVerdict::Incorrect)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub wpm: u32,
    pub accuracy: u32,
    pub typed_letters: usize,
    pub correct_letters: usize,
    pub wrong_letters: usize,
    pub correct_words: usize,
    pub incorrect_words: usize,
}

impl Stats {
    pub fn compute(session: &Session, now: SystemTime) -> Self {
        Self::from_slots(session.slots(), elapsed(session.phase(), now))
    }

    pub fn from_slots(slots: &[WordSlot], elapsed: Duration) -> Self {
        let mut stats = Stats::default();

        for slot in slots
            .iter()
            .filter(|s| !s.typed.is_empty() || s.is_submitted())
        {
            stats.typed_letters += slot.typed.chars().count();

            for pair in slot.typed.chars().zip_longest(slot.expected.chars()) {
                match pair {
                    EitherOrBoth::Both(t, e) if t == e => stats.correct_letters += 1,
                    EitherOrBoth::Both(_, _) | EitherOrBoth::Left(_) => stats.wrong_letters += 1,
                    EitherOrBoth::Right(_) => {}
                }
            }

            if slot.is_submitted() {
                if slot.typed == slot.expected {
                    stats.correct_words += 1;
                } else {
                    stats.incorrect_words += 1;
                }
            }
        }

        stats.wpm = wpm(stats.correct_letters, elapsed);
        stats.accuracy = accuracy(stats.correct_letters, stats.wrong_letters);
        stats
    }
}

/// Time the session has been (or was) running
pub fn elapsed(phase: &SessionPhase, now: SystemTime) -> Duration {
    match phase {
        SessionPhase::Idle => Duration::ZERO,
        SessionPhase::Running { started_at } => now.duration_since(*started_at).unwrap_or_default(),
        SessionPhase::Ended {
            started_at,
            ended_at,
            ..
        } => ended_at.duration_since(*started_at).unwrap_or_default(),
    }
}

/// A word is five correct letters; the first second counts as a full second
pub fn wpm(correct_letters: usize, elapsed: Duration) -> u32 {
    let minutes = (elapsed.as_secs_f64() / 60.0).max(1.0 / 60.0);
    let wpm = ((correct_letters as f64 / 5.0) / minutes).round();
    if wpm.is_finite() && wpm > 0.0 {
        wpm as u32
    } else {
        0
    }
}

pub fn accuracy(correct_letters: usize, wrong_letters: usize) -> u32 {
    let total = correct_letters + wrong_letters;
    if total == 0 {
        return 100;
    }
    ((correct_letters as f64 / total as f64) * 100.0).round() as u32
}

/// Frozen results of an ended session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub time_control: TimeControl,
    pub elapsed_secs: u64,
    pub wpm: u32,
    pub accuracy: u32,
    pub correct_words: usize,
    pub incorrect_words: usize,
    pub typed_letters: usize,
}

impl Summary {
    pub fn capture(session: &Session, started_at: SystemTime, ended_at: SystemTime) -> Self {
        let elapsed = ended_at.duration_since(started_at).unwrap_or_default();
        let stats = Stats::from_slots(session.slots(), elapsed);
        Self {
            time_control: session.time_control(),
            elapsed_secs: elapsed.as_secs(),
            wpm: stats.wpm,
            accuracy: stats.accuracy,
            correct_words: stats.correct_words,
            incorrect_words: stats.incorrect_words,
            typed_letters: stats.typed_letters,
        }
    }

    pub fn time_label(&self) -> String {
        match self.time_control {
            TimeControl::Seconds(secs) => format!("{secs}s"),
            TimeControl::Unbounded => format!("{}s (∞)", self.elapsed_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::WordStatus;

    fn slot(expected: &str, typed: &str, status: WordStatus) -> WordSlot {
        WordSlot {
            expected: expected.to_string(),
            typed: typed.to_string(),
            status,
        }
    }

    fn marks(m: &LetterMarks) -> Vec<LetterMark> {
        m.letters.iter().map(|(_, mark)| *mark).collect()
    }

    use super::LetterMark::{Correct as C, Neutral as N, Wrong as W};

    #[test]
    fn test_letter_marks_clean_prefix() {
        let m = letter_marks("hello", "hel");
        assert_eq!(marks(&m), vec![C, C, C, N, N]);
        assert!(!m.has_mismatch);
        assert!(m.overflow.is_empty());
    }

    #[test]
    fn test_letter_marks_mismatch_turns_whole_word_wrong() {
        let m = letter_marks("hello", "hxl");
        assert_eq!(marks(&m), vec![W, W, W, N, N]);
        assert!(m.has_mismatch);
    }

    #[test]
    fn test_letter_marks_overflow() {
        let m = letter_marks("be", "bee");
        assert_eq!(marks(&m), vec![W, W]);
        assert_eq!(m.overflow, vec!['e']);
        assert!(m.has_mismatch);
    }

    #[test]
    fn test_letter_marks_untyped() {
        let m = letter_marks("be", "");
        assert_eq!(marks(&m), vec![N, N]);
        assert!(!m.has_mismatch);
    }

    #[test]
    fn test_word_verdict() {
        assert_eq!(
            word_verdict(&slot("the", "the", WordStatus::Submitted)),
            Some(WordVerdict::Correct)
        );
        assert_eq!(
            word_verdict(&slot("the", "th", WordStatus::Submitted)),
            Some(WordVerdict::Incorrect)
        );
        assert_eq!(word_verdict(&slot("the", "th", WordStatus::InProgress)), None);
        assert_eq!(
            word_verdict(&slot("the", "tx", WordStatus::InProgress)),
            Some(WordVerdict::Incorrect)
        );
        assert_eq!(word_verdict(&slot("the", "", WordStatus::Untouched)), None);
    }

    #[test]
    fn test_zero_letters() {
        let stats = Stats::from_slots(&[slot("the", "", WordStatus::Untouched)], Duration::ZERO);
        assert_eq!(stats.accuracy, 100);
        assert_eq!(stats.wpm, 0);
        assert_eq!(stats.typed_letters, 0);
    }

    #[test]
    fn test_letter_counts() {
        let slots = [
            slot("the", "the", WordStatus::Submitted),
            slot("be", "bee", WordStatus::Submitted),
            slot("to", "tx", WordStatus::InProgress),
        ];
        let stats = Stats::from_slots(&slots, Duration::from_secs(60));

        assert_eq!(stats.typed_letters, 8);
        // the(3) + be(2) + t(1)
        assert_eq!(stats.correct_letters, 6);
        // overflow 'e' + 'x'
        assert_eq!(stats.wrong_letters, 2);
        assert_eq!(stats.correct_words, 1);
        assert_eq!(stats.incorrect_words, 1);
        assert_eq!(stats.accuracy, 75);
    }

    #[test]
    fn test_submitted_empty_word_counts_as_incorrect() {
        let stats = Stats::from_slots(&[slot("the", "", WordStatus::Submitted)], Duration::ZERO);
        assert_eq!(stats.incorrect_words, 1);
        assert_eq!(stats.typed_letters, 0);
        assert_eq!(stats.accuracy, 100);
    }

    #[test]
    fn test_wpm_formula() {
        // 50 correct letters = 10 words in one minute
        assert_eq!(wpm(50, Duration::from_secs(60)), 10);
        assert_eq!(wpm(50, Duration::from_secs(30)), 20);
        // clamped to one second
        assert_eq!(wpm(5, Duration::ZERO), 60);
        assert_eq!(wpm(5, Duration::from_millis(200)), 60);
        assert_eq!(wpm(0, Duration::ZERO), 0);
    }

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy(2, 1), 67);
        assert_eq!(accuracy(0, 4), 0);
        assert_eq!(accuracy(0, 0), 100);
    }

    #[test]
    fn test_elapsed_by_phase() {
        let t0 = SystemTime::now();
        let later = t0 + Duration::from_secs(10);

        assert_eq!(elapsed(&SessionPhase::Idle, later), Duration::ZERO);
        assert_eq!(
            elapsed(&SessionPhase::Running { started_at: t0 }, later),
            Duration::from_secs(10)
        );
        let ended = SessionPhase::Ended {
            started_at: t0,
            ended_at: t0 + Duration::from_secs(4),
            summary: Summary::capture(
                &Session::new(vec!["a".into()], TimeControl::Unbounded),
                t0,
                t0 + Duration::from_secs(4),
            ),
        };
        assert_eq!(elapsed(&ended, later), Duration::from_secs(4));
    }

    #[test]
    fn test_time_label() {
        let session = Session::new(vec!["a".into()], TimeControl::Unbounded);
        let t0 = SystemTime::now();
        let summary = Summary::capture(&session, t0, t0 + Duration::from_millis(45_900));
        assert_eq!(summary.time_label(), "45s (∞)");

        let session = Session::new(vec!["a".into()], TimeControl::Seconds(30));
        let summary = Summary::capture(&session, t0, t0 + Duration::from_secs(30));
        assert_eq!(summary.time_label(), "30s");
    }
}
