//! Locale service: the process-wide, read-only query surface over the
//! configured language/currency lists and the generated name tables.
//!
//! The service never changes after construction. Per-request state (the current
//! language) lives in [`crate::i18n::Locale`].

use crate::error::{LocaleError, Result};
use crate::i18n::tables::{lookup_key, LocaleTables, NameTable};
use crate::i18n::url;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Locale configuration shared by the generator and the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSettings {
    /// Supported language codes, in display order
    pub lang_list: Vec<String>,

    /// Supported currency codes, in display order
    pub currency_list: Vec<String>,

    /// Default currency code
    pub currency_default: String,

    /// Fallback language code
    pub lang_default: String,
}

impl LocaleSettings {
    /// Check that the defaults are members of their lists.
    pub fn validate(&self) -> Result<()> {
        if self.lang_list.is_empty() {
            return Err(LocaleError::Config("language list is empty".to_string()));
        }
        if !self.lang_list.contains(&self.lang_default) {
            return Err(LocaleError::Config(format!(
                "default language '{}' is not in the supported list {:?}",
                self.lang_default, self.lang_list
            )));
        }
        check_lang_codes(&self.lang_list)?;
        if !self.currency_list.is_empty() && !self.currency_list.contains(&self.currency_default) {
            return Err(LocaleError::Config(format!(
                "default currency '{}' is not in the supported list {:?}",
                self.currency_default, self.currency_list
            )));
        }
        Ok(())
    }
}

/// Language codes become directory names in the generated data, so path
/// syntax is refused.
pub(crate) fn check_lang_codes(lang_list: &[String]) -> Result<()> {
    match lang_list.iter().find(|lang| !is_safe_code(lang)) {
        Some(bad) => Err(LocaleError::Config(format!(
            "language code '{}' cannot be used as a directory name",
            bad
        ))),
        None => Ok(()),
    }
}

fn is_safe_code(code: &str) -> bool {
    !code.is_empty()
        && !code.contains("..")
        && !code.contains(['/', '\\'])
}

/// A supported language with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LangItem {
    pub lang: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
}

/// A supported currency with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyItem {
    pub currency: String,
    pub name: String,
}

/// A language switcher entry: the current page in another language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteLangItem {
    pub lang: String,
    pub name: String,
    pub url: String,
    pub flag: String,
}

#[derive(Debug)]
pub struct LocaleService {
    settings: LocaleSettings,
    tables: LocaleTables,
    all_langs: HashSet<String>,
}

impl LocaleService {
    /// Build the service from settings and loaded tables.
    ///
    /// Fails if the settings are inconsistent or a supported language has no tables.
    pub fn new(settings: LocaleSettings, tables: LocaleTables) -> Result<Self> {
        settings.validate()?;

        if let Some(missing) = settings
            .lang_list
            .iter()
            .find(|lang| tables.get(lang).is_none())
        {
            return Err(LocaleError::Config(format!(
                "no locale tables loaded for supported language '{}'",
                missing
            )));
        }

        let all_langs: HashSet<String> = tables.all_langs.iter().cloned().collect();

        if let Some(unknown) = settings
            .lang_list
            .iter()
            .find(|lang| !all_langs.contains(lang.as_str()))
        {
            return Err(LocaleError::Config(format!(
                "supported language '{}' is not a known language code",
                unknown
            )));
        }

        Ok(Self {
            settings,
            tables,
            all_langs,
        })
    }

    pub fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    pub fn lang_default(&self) -> &str {
        &self.settings.lang_default
    }

    pub fn currency_default(&self) -> &str {
        &self.settings.currency_default
    }

    pub fn lang_supported_list(&self) -> &[String] {
        &self.settings.lang_list
    }

    pub fn currency_supported_list(&self) -> &[String] {
        &self.settings.currency_list
    }

    /// Every language code known to the upstream data.
    pub fn lang_all_list(&self) -> &[String] {
        &self.tables.all_langs
    }

    /// Any code the upstream data recognizes.
    pub fn is_lang_correct(&self, lang: &str) -> bool {
        self.all_langs.contains(lang)
    }

    /// Only codes from the configured supported list.
    pub fn is_lang_supported(&self, lang: &str) -> bool {
        self.settings.lang_list.iter().any(|l| l == lang)
    }

    /// Resolve a requested language to a supported one, falling back to the default.
    pub fn resolve_lang(&self, lang: Option<&str>) -> &str {
        match lang {
            Some(lang) if self.is_lang_supported(lang) => self
                .settings
                .lang_list
                .iter()
                .find(|l| *l == lang)
                .map(String::as_str)
                .unwrap_or(&self.settings.lang_default),
            _ => &self.settings.lang_default,
        }
    }

    /// Supported languages (optionally intersected with `filter`), named in
    /// `translate_into` and optionally with their native names.
    pub fn lang_list(
        &self,
        filter: &[&str],
        translate_into: Option<&str>,
        include_native: bool,
    ) -> Vec<LangItem> {
        let trans = self.resolve_lang(translate_into);

        self.settings
            .lang_list
            .iter()
            .filter(|lang| filter.is_empty() || filter.contains(&lang.as_str()))
            .map(|lang| LangItem {
                lang: lang.clone(),
                name: self.lang_name(lang, trans),
                native: include_native.then(|| self.lang_name(lang, lang)),
            })
            .collect()
    }

    /// Supported currencies (optionally intersected with `filter`), named in `translate_into`.
    pub fn currency_list(&self, filter: &[&str], translate_into: Option<&str>) -> Vec<CurrencyItem> {
        let trans = self.resolve_lang(translate_into);

        self.settings
            .currency_list
            .iter()
            .filter(|currency| filter.is_empty() || filter.contains(&currency.as_str()))
            .map(|currency| CurrencyItem {
                currency: currency.clone(),
                name: self.lookup(trans, currency, |tables| &tables.currency),
            })
            .collect()
    }

    /// Full country table in `translate_into`.
    pub fn country_list(&self, translate_into: Option<&str>) -> &NameTable {
        let trans = self.resolve_lang(translate_into);
        // Every supported language has tables (checked in `new`).
        &self.tables.by_lang[trans].country
    }

    /// Name of `lang` rendered in `trans`.
    pub fn lang_name(&self, lang: &str, trans: &str) -> String {
        self.lookup(trans, lang, |tables| &tables.lang)
    }

    fn lookup(
        &self,
        trans: &str,
        code: &str,
        table: impl Fn(&crate::i18n::LangTables) -> &NameTable,
    ) -> String {
        match self
            .tables
            .get(trans)
            .and_then(|tables| table(tables).get(&lookup_key(code)))
        {
            Some(name) => name.clone(),
            None => {
                debug!("No display name for '{}' in '{}' tables", code, trans);
                code.to_string()
            }
        }
    }

    /// Remove a leading language segment from `url` when it is a correct language code.
    pub fn url_without_lang(&self, url: &str) -> String {
        url::strip_lang_segment(url, |segment| self.is_lang_correct(segment))
    }

    /// The current URL in every supported language, for a language switcher.
    pub fn route_lang_list(&self, current_url: &str) -> Result<Vec<RouteLangItem>> {
        let base = self.url_without_lang(current_url);

        self.lang_list(&[], None, true)
            .into_iter()
            .map(|item| -> Result<RouteLangItem> {
                let url = if item.lang == self.settings.lang_default {
                    base.clone()
                } else {
                    url::prefix_lang(&base, &item.lang)?
                };

                Ok(RouteLangItem {
                    flag: self.flag(&item.lang),
                    name: item.native.unwrap_or(item.name),
                    lang: item.lang,
                    url,
                })
            })
            .collect()
    }

    /// Flag icon identifier for a language.
    pub fn flag(&self, lang: &str) -> String {
        match lang {
            "en" => "us".to_string(),
            other => other.to_string(),
        }
    }
}
