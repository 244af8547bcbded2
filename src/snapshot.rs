use crate::{
    session::{PhaseTag, Session, WordSlot, WordStatus},
    stats::{letter_marks, word_verdict, LetterMarks, Stats, Summary, WordVerdict},
    time_series::TimeSeriesPoint,
    timer::Remaining,
};

/// Everything the renderer needs to paint one word
#[derive(Debug, Clone, PartialEq)]
pub struct WordView<'a> {
    pub index: usize,
    pub expected: &'a str,
    pub typed: &'a str,
    pub marks: LetterMarks,
    pub status: WordStatus,
    pub verdict: Option<WordVerdict>,
    pub is_active: bool,
}

impl<'a> WordView<'a> {
    pub fn new(index: usize, slot: &'a WordSlot, is_active: bool) -> Self {
        Self {
            index,
            expected: &slot.expected,
            typed: &slot.typed,
            marks: letter_marks(&slot.expected, &slot.typed),
            status: slot.status,
            verdict: word_verdict(slot),
            is_active,
        }
    }
}

/// Read-only view of a practice session after the latest mutation
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub session: &'a Session,
    pub phase: PhaseTag,
    pub stats: Stats,
    pub remaining: Remaining,
    pub summary: Option<Summary>,
    pub wpm_series: &'a [TimeSeriesPoint],
}

impl<'a> Snapshot<'a> {
    pub fn words(&self) -> impl Iterator<Item = WordView<'a>> + 'a {
        let session = self.session;
        let active = session.active_index();
        session
            .slots()
            .iter()
            .enumerate()
            .map(move |(i, slot)| WordView::new(i, slot, i == active))
    }

    pub fn total_words(&self) -> usize {
        self.session.len()
    }
}
