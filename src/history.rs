use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    app_dirs::AppDirs,
    error::{Error, Result},
    stats::Summary,
};

/// One line of the results log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: DateTime<Local>,
    /// empty for unbounded sessions
    pub duration_secs: Option<u64>,
    pub elapsed_secs: u64,
    pub wpm: u32,
    pub accuracy: u32,
    pub correct_words: usize,
    pub incorrect_words: usize,
    pub typed_letters: usize,
}

impl HistoryRecord {
    pub fn from_summary(summary: &Summary, date: DateTime<Local>) -> Self {
        Self {
            date,
            duration_secs: summary.time_control.as_secs(),
            elapsed_secs: summary.elapsed_secs,
            wpm: summary.wpm,
            accuracy: summary.accuracy,
            correct_words: summary.correct_words,
            incorrect_words: summary.incorrect_words,
            typed_letters: summary.typed_letters,
        }
    }
}

/// Append-only CSV log of finished sessions
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::with_path(AppDirs::history_path())
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &HistoryRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| Error::io("creating history dir", parent, source))?;
        }

        // If the log doesn't exist yet, the csv writer emits the header row
        let needs_header = !self.path.exists();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| Error::io("opening history", &self.path, source))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|source| self.csv_error("writing", source))?;
        writer
            .flush()
            .map_err(|source| Error::io("flushing history", &self.path, source))
    }

    pub fn read_all(&self) -> Result<Vec<HistoryRecord>> {
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|source| self.csv_error("opening", source))?;
        reader
            .deserialize()
            .collect::<std::result::Result<Vec<HistoryRecord>, _>>()
            .map_err(|source| self.csv_error("reading", source))
    }

    fn csv_error(&self, operation: &'static str, source: csv::Error) -> Error {
        Error::History {
            operation,
            path: self.path.clone(),
            source,
        }
    }
}
