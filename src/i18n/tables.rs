//! Localized name tables: the typed in-memory form of the generated locale data.
//!
//! The generator writes these tables as JSON files and the locale service loads
//! them once at startup. Keys are lowercased at generation time, so every lookup
//! goes through [`lookup_key`].

use crate::error::{LocaleError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// Mapping from a code (country, currency or language) to its display name.
pub type NameTable = BTreeMap<String, String>;

/// File holding the full list of language codes known to the upstream data.
pub const ALL_LANGS_FILE: &str = "lang_all.json";
pub const COUNTRY_FILE: &str = "country.json";
pub const CURRENCY_FILE: &str = "currency.json";
pub const LANG_FILE: &str = "lang.json";

/// Normalize a code to the form used as a table key.
pub fn lookup_key(code: &str) -> String {
    code.to_lowercase()
}

/// The three name tables rendered in one translation language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangTables {
    pub country: NameTable,
    pub currency: NameTable,
    pub lang: NameTable,
}

impl LangTables {
    /// Load the tables of one language from `<dir>/<lang>/`.
    pub fn load(dir: &Path, lang: &str) -> Result<Self> {
        let lang_dir = dir.join(lang);
        Ok(Self {
            country: read_json(&lang_dir.join(COUNTRY_FILE))?,
            currency: read_json(&lang_dir.join(CURRENCY_FILE))?,
            lang: read_json(&lang_dir.join(LANG_FILE))?,
        })
    }
}

/// All locale data the service needs: the "all known" language list plus the
/// name tables of every supported language.
#[derive(Debug, Clone, Default)]
pub struct LocaleTables {
    pub all_langs: Vec<String>,
    pub by_lang: HashMap<String, LangTables>,
}

impl LocaleTables {
    /// Load generated data for the given supported languages from `dir`.
    pub fn load(dir: &Path, lang_list: &[String]) -> Result<Self> {
        let all_langs: Vec<String> = read_json(&dir.join(ALL_LANGS_FILE))?;

        let mut by_lang = HashMap::with_capacity(lang_list.len());
        for lang in lang_list {
            by_lang.insert(lang.clone(), LangTables::load(dir, lang)?);
        }

        debug!(
            "Loaded locale tables for {} languages ({} known codes)",
            by_lang.len(),
            all_langs.len()
        );

        Ok(Self { all_langs, by_lang })
    }

    pub fn get(&self, lang: &str) -> Option<&LangTables> {
        self.by_lang.get(lang)
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LocaleError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            LocaleError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|source| LocaleError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).map_err(|source| LocaleError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, content).map_err(|source| LocaleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table(entries: &[(&str, &str)]) -> NameTable {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_lookup_key_lowercases() {
        assert_eq!(lookup_key("USD"), "usd");
        assert_eq!(lookup_key("pt_BR"), "pt_br");
        assert_eq!(lookup_key("en"), "en");
    }

    #[test]
    fn test_all_langs_file_distinct_from_lang_table() {
        assert_ne!(ALL_LANGS_FILE, LANG_FILE);
    }

    #[test]
    fn test_load_reads_written_tables() {
        let dir = TempDir::new().expect("temp dir");
        write_json(&dir.path().join(ALL_LANGS_FILE), &vec!["en", "fr", "xx"]).unwrap();

        let fr_dir = dir.path().join("fr");
        std::fs::create_dir(&fr_dir).unwrap();
        write_json(&fr_dir.join(COUNTRY_FILE), &table(&[("fr", "France")])).unwrap();
        write_json(&fr_dir.join(CURRENCY_FILE), &table(&[("eur", "euro")])).unwrap();
        write_json(&fr_dir.join(LANG_FILE), &table(&[("fr", "français")])).unwrap();

        let tables = LocaleTables::load(dir.path(), &["fr".to_string()]).expect("load");
        assert_eq!(tables.all_langs, vec!["en", "fr", "xx"]);

        let fr = tables.get("fr").expect("fr tables");
        assert_eq!(fr.country.get("fr").map(String::as_str), Some("France"));
        assert_eq!(fr.currency.get("eur").map(String::as_str), Some("euro"));
        assert!(tables.get("en").is_none());
    }

    #[test]
    fn test_load_missing_language_dir() {
        let dir = TempDir::new().expect("temp dir");
        write_json(&dir.path().join(ALL_LANGS_FILE), &vec!["en"]).unwrap();

        let err = LocaleTables::load(dir.path(), &["en".to_string()]).unwrap_err();
        assert!(matches!(err, LocaleError::MissingFile { .. }));
    }

    #[test]
    fn test_read_json_invalid_content() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_json::<NameTable>(&path).unwrap_err();
        assert!(matches!(err, LocaleError::Json { .. }));
    }
}
