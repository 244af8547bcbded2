use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode config: {0}")]
    ConfigEncode(#[source] serde_json::Error),

    #[error("language file '{0}' is not bundled")]
    LanguageNotFound(String),

    #[error("language file '{name}' is not valid: {source}")]
    LanguageParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("word pool is empty; select at least one language with words")]
    EmptyPool,

    #[error("history error while {operation} at {path}: {source}")]
    History {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl Error {
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
