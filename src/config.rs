use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{
    app_dirs::AppDirs,
    error::{Error, Result},
    language::SupportedLanguage,
    time_control::{TimeControl, TimeSelection},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub time: TimeSelection,
    /// raw text of the custom duration field
    pub custom_secs: String,
    pub languages: Vec<SupportedLanguage>,
    pub punctuation: bool,
    pub record_history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time: TimeSelection::default(),
            custom_secs: String::new(),
            languages: SupportedLanguage::ALL.to_vec(),
            punctuation: true,
            record_history: false,
        }
    }
}

impl Config {
    pub fn time_control(&self) -> TimeControl {
        self.time.resolve(&self.custom_secs)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> Result<Option<Config>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(Error::io("reading config", &self.path, source)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| Error::ConfigParse {
                path: self.path.clone(),
                source,
            })
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Falls back to defaults when the file is missing or unreadable
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => cfg.unwrap_or_default(),
            Err(err) => {
                warn!(%err, "using default config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| Error::io("creating config dir", parent, source))?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(Error::ConfigEncode)?;
        fs::write(&self.path, data).map_err(|source| Error::io("writing config", &self.path, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested/deeper/config.json"));
        let cfg = Config {
            time: TimeSelection::Custom,
            custom_secs: "15".into(),
            languages: vec![SupportedLanguage::Uzbek],
            punctuation: false,
            record_history: true,
        };
        store.save(&cfg).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.time_control(), TimeControl::Seconds(15));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
        assert_matches!(store.try_load(), Ok(None));
    }

    #[test]
    fn malformed_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);

        assert_matches!(store.try_load(), Err(Error::ConfigParse { .. }));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "time": "unbounded" }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).load();

        assert_eq!(cfg.time_control(), TimeControl::Unbounded);
        assert!(cfg.punctuation);
        assert_eq!(cfg.languages, SupportedLanguage::ALL.to_vec());
    }

    #[test]
    fn default_time_control_is_sixty_seconds() {
        assert_eq!(Config::default().time_control(), TimeControl::Seconds(60));
    }
}
