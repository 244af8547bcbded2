pub mod core;

pub use core::Language;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Word lists bundled with the binary
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SupportedLanguage {
    English,
    Uzbek,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 2] = [SupportedLanguage::English, SupportedLanguage::Uzbek];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_file_stem() {
        assert_eq!(SupportedLanguage::English.to_string(), "english");
        assert_eq!(SupportedLanguage::Uzbek.to_string(), "uzbek");
    }
}
