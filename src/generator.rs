//! Locale data generator.
//!
//! Builds the data directory read by [`crate::i18n::LocaleTables`] from the
//! umpirsky country/currency/language packages:
//!
//! ```text
//! <output>/lang_all.json          all language codes known upstream
//! <output>/manifest.json          generation time and the lists used
//! <output>/<lang>/country.json    every country, named in <lang>
//! <output>/<lang>/currency.json   supported currencies, named in <lang>
//! <output>/<lang>/lang.json       supported languages, named in <lang>
//! ```
//!
//! Table keys are lowercased. The output directory is recreated on each run.

use crate::error::{LocaleError, Result};
use crate::i18n::{
    check_lang_codes, lookup_key, read_json, write_json, NameTable, ALL_LANGS_FILE, COUNTRY_FILE,
    CURRENCY_FILE, LANG_FILE,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An upstream data package inside the vendor directory.
#[derive(Debug, Clone, Copy)]
pub struct UpstreamPackage {
    pub name: &'static str,
    /// File name under `data/<lang>/`
    pub file: &'static str,
}

impl UpstreamPackage {
    pub fn root(&self, vendor_dir: &Path) -> PathBuf {
        vendor_dir.join(self.name)
    }

    pub fn data_file(&self, vendor_dir: &Path, lang: &str) -> PathBuf {
        self.root(vendor_dir).join("data").join(lang).join(self.file)
    }
}

pub const COUNTRY_PACKAGE: UpstreamPackage = UpstreamPackage {
    name: "umpirsky/country-list",
    file: "country.json",
};

pub const CURRENCY_PACKAGE: UpstreamPackage = UpstreamPackage {
    name: "umpirsky/currency-list",
    file: "currency.json",
};

pub const LANGUAGE_PACKAGE: UpstreamPackage = UpstreamPackage {
    name: "umpirsky/language-list",
    file: "language.json",
};

/// Language whose name table lists every known language code.
const REFERENCE_LANG: &str = "en";

const MANIFEST_FILE: &str = "manifest.json";

/// Record of a generator run, written next to the tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub lang_list: Vec<String>,
    pub currency_list: Vec<String>,
}

/// Entry counts written for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageReport {
    pub lang: String,
    pub countries: usize,
    pub currencies: usize,
    pub languages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub known_languages: usize,
    pub languages: Vec<LanguageReport>,
}

/// Fail with the name of the first upstream package missing from `vendor_dir`.
pub fn check_dependencies(vendor_dir: &Path) -> Result<()> {
    for package in [COUNTRY_PACKAGE, CURRENCY_PACKAGE, LANGUAGE_PACKAGE] {
        if !package.root(vendor_dir).exists() {
            return Err(LocaleError::MissingDependency {
                package: package.name,
            });
        }
    }
    Ok(())
}

/// Regenerate all locale tables in `output_dir`.
pub fn generate(
    vendor_dir: &Path,
    output_dir: &Path,
    lang_list: &[String],
    currency_list: &[String],
) -> Result<GenerateReport> {
    check_dependencies(vendor_dir)?;
    check_lang_codes(lang_list)?;

    recreate_dir(output_dir)?;

    let reference: NameTable = read_json(&LANGUAGE_PACKAGE.data_file(vendor_dir, REFERENCE_LANG))?;
    let known: Vec<&String> = reference.keys().collect();
    write_json(&output_dir.join(ALL_LANGS_FILE), &known)?;
    info!("Wrote {} known language codes", known.len());

    let lang_keys = key_set(lang_list);
    let currency_keys = key_set(currency_list);

    let mut languages = Vec::with_capacity(lang_list.len());
    for lang in lang_list {
        let lang_dir = output_dir.join(lang);
        create_dir(&lang_dir)?;

        let countries = normalize(read_json(&COUNTRY_PACKAGE.data_file(vendor_dir, lang))?, None);
        write_json(&lang_dir.join(COUNTRY_FILE), &countries)?;

        let currencies = normalize(
            read_json(&CURRENCY_PACKAGE.data_file(vendor_dir, lang))?,
            Some(&currency_keys),
        );
        write_json(&lang_dir.join(CURRENCY_FILE), &currencies)?;

        let names = normalize(
            read_json(&LANGUAGE_PACKAGE.data_file(vendor_dir, lang))?,
            Some(&lang_keys),
        );
        write_json(&lang_dir.join(LANG_FILE), &names)?;

        debug!(
            "Generated '{}': {} countries, {} currencies, {} languages",
            lang,
            countries.len(),
            currencies.len(),
            names.len()
        );

        languages.push(LanguageReport {
            lang: lang.clone(),
            countries: countries.len(),
            currencies: currencies.len(),
            languages: names.len(),
        });
    }

    let manifest = Manifest {
        generated_at: Utc::now(),
        lang_list: lang_list.to_vec(),
        currency_list: currency_list.to_vec(),
    };
    write_json(&output_dir.join(MANIFEST_FILE), &manifest)?;

    Ok(GenerateReport {
        known_languages: known.len(),
        languages,
    })
}

/// Read the manifest of a previous run.
pub fn read_manifest(output_dir: &Path) -> Result<Manifest> {
    read_json(&output_dir.join(MANIFEST_FILE))
}

fn key_set(codes: &[String]) -> HashSet<String> {
    codes.iter().map(|code| lookup_key(code)).collect()
}

/// Lowercase keys, keeping only those in `allowed` when given.
fn normalize(table: NameTable, allowed: Option<&HashSet<String>>) -> NameTable {
    table
        .into_iter()
        .map(|(key, name)| (lookup_key(&key), name))
        .filter(|(key, _)| allowed.map_or(true, |allowed| allowed.contains(key)))
        .collect()
}

fn recreate_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir).map_err(|source| LocaleError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::create_dir_all(dir).map_err(|source| LocaleError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| LocaleError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleTables;
    use tempfile::TempDir;

    fn write_upstream(vendor: &Path, package: UpstreamPackage, lang: &str, entries: &[(&str, &str)]) {
        let path = package.data_file(vendor, lang);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let table: NameTable = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        std::fs::write(&path, serde_json::to_string(&table).unwrap()).unwrap();
    }

    /// Vendor dir with en and fr data in all three packages.
    fn vendor_fixture() -> TempDir {
        let vendor = TempDir::new().expect("temp dir");
        let root = vendor.path();

        write_upstream(root, COUNTRY_PACKAGE, "en", &[("DE", "Germany"), ("FR", "France"), ("US", "United States")]);
        write_upstream(root, COUNTRY_PACKAGE, "fr", &[("DE", "Allemagne"), ("FR", "France"), ("US", "États-Unis")]);

        write_upstream(root, CURRENCY_PACKAGE, "en", &[("EUR", "Euro"), ("GBP", "British Pound"), ("USD", "US Dollar")]);
        write_upstream(root, CURRENCY_PACKAGE, "fr", &[("EUR", "euro"), ("GBP", "livre sterling"), ("USD", "dollar des États-Unis")]);

        write_upstream(root, LANGUAGE_PACKAGE, "en", &[("de", "German"), ("en", "English"), ("fr", "French"), ("pt_BR", "Brazilian Portuguese")]);
        write_upstream(root, LANGUAGE_PACKAGE, "fr", &[("de", "allemand"), ("en", "anglais"), ("fr", "français"), ("pt_BR", "portugais brésilien")]);

        vendor
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_path_like_language_code_rejected_before_writing() {
        let vendor = vendor_fixture();
        let output = TempDir::new().expect("temp dir");
        let marker = output.path().join("keep.txt");
        std::fs::write(&marker, "x").unwrap();

        let err = generate(vendor.path(), output.path(), &strings(&["en", "../x"]), &[]).unwrap_err();
        assert!(matches!(err, LocaleError::Config(_)));
        assert!(marker.exists());
    }

    #[test]
    fn test_missing_dependency_reported_first() {
        let vendor = TempDir::new().expect("temp dir");
        let output = TempDir::new().expect("temp dir");
        let marker = output.path().join("keep.txt");
        std::fs::write(&marker, "old").unwrap();

        let err = generate(vendor.path(), output.path(), &strings(&["en"]), &strings(&["USD"])).unwrap_err();
        assert!(matches!(
            err,
            LocaleError::MissingDependency { package: "umpirsky/country-list" }
        ));
        // Nothing touched when a package is missing
        assert!(marker.exists());
    }

    #[test]
    fn test_missing_language_package() {
        let vendor = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(COUNTRY_PACKAGE.root(vendor.path())).unwrap();
        std::fs::create_dir_all(CURRENCY_PACKAGE.root(vendor.path())).unwrap();

        let err = check_dependencies(vendor.path()).unwrap_err();
        assert_eq!(err.to_string(), "\"umpirsky/language-list\" package is not installed");
    }

    #[test]
    fn test_generate_filters_and_lowercases() {
        let vendor = vendor_fixture();
        let output = TempDir::new().expect("temp dir");
        let out = output.path().join("locale");

        let report = generate(vendor.path(), &out, &strings(&["en", "fr"]), &strings(&["USD", "EUR"]))
            .expect("generate");

        assert_eq!(report.known_languages, 4);
        assert_eq!(
            report.languages[1],
            LanguageReport {
                lang: "fr".into(),
                countries: 3,
                currencies: 2,
                languages: 2,
            }
        );

        let all: Vec<String> = read_json(&out.join(ALL_LANGS_FILE)).unwrap();
        assert_eq!(all, strings(&["de", "en", "fr", "pt_BR"]));

        let countries: NameTable = read_json(&out.join("fr").join(COUNTRY_FILE)).unwrap();
        assert_eq!(countries.get("us").map(String::as_str), Some("États-Unis"));
        assert!(countries.keys().all(|k| k == &k.to_lowercase()));

        let currencies: NameTable = read_json(&out.join("fr").join(CURRENCY_FILE)).unwrap();
        assert_eq!(currencies.keys().collect::<Vec<_>>(), vec!["eur", "usd"]);

        let langs: NameTable = read_json(&out.join("en").join(LANG_FILE)).unwrap();
        assert_eq!(langs.keys().collect::<Vec<_>>(), vec!["en", "fr"]);
    }

    #[test]
    fn test_generate_removes_stale_output() {
        let vendor = vendor_fixture();
        let output = TempDir::new().expect("temp dir");
        let out = output.path();

        generate(vendor.path(), out, &strings(&["en", "fr"]), &strings(&["USD"])).unwrap();
        assert!(out.join("fr").exists());

        generate(vendor.path(), out, &strings(&["en"]), &strings(&["USD"])).unwrap();
        assert!(!out.join("fr").exists());
        assert!(out.join("en").join(COUNTRY_FILE).exists());
    }

    #[test]
    fn test_generate_missing_language_data() {
        let vendor = vendor_fixture();
        let output = TempDir::new().expect("temp dir");

        let err = generate(vendor.path(), output.path(), &strings(&["en", "de"]), &strings(&["USD"])).unwrap_err();
        assert!(matches!(err, LocaleError::MissingFile { .. }));
    }

    #[test]
    fn test_manifest_and_tables_load() {
        let vendor = vendor_fixture();
        let output = TempDir::new().expect("temp dir");
        let langs = strings(&["en", "fr"]);
        let currencies = strings(&["USD"]);

        generate(vendor.path(), output.path(), &langs, &currencies).unwrap();

        let manifest = read_manifest(output.path()).expect("manifest");
        assert_eq!(manifest.lang_list, langs);
        assert_eq!(manifest.currency_list, currencies);

        let tables = LocaleTables::load(output.path(), &langs).expect("load generated");
        assert_eq!(
            tables.get("fr").unwrap().currency.get("usd").map(String::as_str),
            Some("dollar des États-Unis")
        );
    }

    #[test]
    fn test_mixed_case_language_codes() {
        let vendor = vendor_fixture();
        write_upstream(vendor.path(), COUNTRY_PACKAGE, "pt_BR", &[("BR", "Brasil")]);
        write_upstream(vendor.path(), CURRENCY_PACKAGE, "pt_BR", &[("BRL", "Real brasileiro")]);
        write_upstream(vendor.path(), LANGUAGE_PACKAGE, "pt_BR", &[("en", "inglês"), ("pt_BR", "português (Brasil)")]);
        let output = TempDir::new().expect("temp dir");

        generate(vendor.path(), output.path(), &strings(&["en", "pt_BR"]), &strings(&["BRL"])).unwrap();

        let langs: NameTable = read_json(&output.path().join("pt_BR").join(LANG_FILE)).unwrap();
        assert_eq!(langs.get("pt_br").map(String::as_str), Some("português (Brasil)"));
        assert_eq!(langs.len(), 2);
    }
}
