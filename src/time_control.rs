use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const PRESET_SECS: [u64; 4] = [15, 30, 60, 120];
pub const DEFAULT_CUSTOM_SECS: u64 = 30;

/// How long a session may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeControl {
    Seconds(u64),
    Unbounded,
}

impl TimeControl {
    pub fn as_secs(&self) -> Option<u64> {
        match self {
            TimeControl::Seconds(secs) => Some(*secs),
            TimeControl::Unbounded => None,
        }
    }
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeControl::Seconds(secs) => write!(f, "{secs}s"),
            TimeControl::Unbounded => write!(f, "∞"),
        }
    }
}

/// Option picked in the duration selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSelection {
    Preset(u64),
    Custom,
    #[serde(alias = "infinite")]
    Unbounded,
}

impl Default for TimeSelection {
    fn default() -> Self {
        TimeSelection::Preset(60)
    }
}

impl TimeSelection {
    /// Every selector option in display order
    pub fn options() -> Vec<TimeSelection> {
        PRESET_SECS
            .iter()
            .map(|&secs| TimeSelection::Preset(secs))
            .chain([TimeSelection::Custom, TimeSelection::Unbounded])
            .collect()
    }

    pub fn next(self) -> Self {
        self.step(true)
    }

    pub fn previous(self) -> Self {
        self.step(false)
    }

    /// An off-list preset such as `-t 45` moves to its neighbours by length
    fn step(self, forward: bool) -> Self {
        let options = Self::options();
        let len = options.len();
        let (before, after) = match options.iter().position(|o| *o == self) {
            Some(idx) => ((idx + len - 1) % len, (idx + 1) % len),
            None => {
                let secs = match self {
                    TimeSelection::Preset(secs) => secs,
                    _ => 0,
                };
                let after = PRESET_SECS.iter().position(|&p| p > secs).unwrap_or(PRESET_SECS.len());
                ((after + len - 1) % len, after)
            }
        };
        if forward {
            options[after]
        } else {
            options[before]
        }
    }

    pub fn resolve(self, custom_input: &str) -> TimeControl {
        match self {
            TimeSelection::Preset(secs) => TimeControl::Seconds(secs),
            TimeSelection::Custom => TimeControl::Seconds(parse_custom_secs(custom_input)),
            TimeSelection::Unbounded => TimeControl::Unbounded,
        }
    }
}

impl fmt::Display for TimeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSelection::Preset(secs) => write!(f, "{secs}"),
            TimeSelection::Custom => write!(f, "custom"),
            TimeSelection::Unbounded => write!(f, "infinite"),
        }
    }
}

impl FromStr for TimeSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "custom" => Ok(TimeSelection::Custom),
            "infinite" | "unbounded" | "∞" => Ok(TimeSelection::Unbounded),
            other => other
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(TimeSelection::Preset)
                .ok_or_else(|| {
                    format!("expected a positive number of seconds, 'custom' or 'infinite', got '{s}'")
                }),
        }
    }
}

/// Invalid, empty or non-positive input falls back to [`DEFAULT_CUSTOM_SECS`]
pub fn parse_custom_secs(input: &str) -> u64 {
    match input.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.5 => secs.round() as u64,
        _ => DEFAULT_CUSTOM_SECS,
    }
}
