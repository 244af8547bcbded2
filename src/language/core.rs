use include_dir::{include_dir, Dir};
use serde::Deserialize;

use crate::error::{Error, Result};

use super::SupportedLanguage;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Language {
    pub name: String,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(language: SupportedLanguage) -> Result<Self> {
        read_language_from_file(&format!("{language}.json"))
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language> {
    let contents = LANG_DIR
        .get_file(file_name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| Error::LanguageNotFound(file_name.to_string()))?;

    serde_json::from_str(contents).map_err(|source| Error::LanguageParse {
        name: file_name.to_string(),
        source,
    })
}
