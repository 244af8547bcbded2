use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "fastwrite";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("fastwrite_config.json"))
    }

    pub fn history_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.data_local_dir().join("history.csv"))
            .unwrap_or_else(|| PathBuf::from("fastwrite_history.csv"))
    }

    /// `$XDG_STATE_HOME` where the platform has one, the local data dir otherwise
    pub fn log_path() -> PathBuf {
        Self::project()
            .map(|pd| {
                pd.state_dir()
                    .unwrap_or_else(|| pd.data_local_dir())
                    .join("fastwrite.log")
            })
            .unwrap_or_else(|| PathBuf::from("fastwrite.log"))
    }
}
