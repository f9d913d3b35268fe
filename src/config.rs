use crate::i18n::LocaleSettings;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Locale
    pub lang_list: Vec<String>,
    pub currency_list: Vec<String>,
    pub currency_default: String,
    pub fallback_locale: String,

    // Data locations
    pub data_dir: PathBuf,
    pub vendor_dir: PathBuf,

    // Server
    pub app_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let lang_list = parse_list(&std::env::var("LOCALE_LANG_LIST").unwrap_or_else(|_| "en".to_string()));
        let currency_list =
            parse_list(&std::env::var("LOCALE_CURRENCY_LIST").unwrap_or_else(|_| "USD".to_string()));

        let currency_default = match std::env::var("LOCALE_CURRENCY_DEFAULT") {
            Ok(value) => value.trim().to_string(),
            Err(_) => currency_list
                .first()
                .cloned()
                .context("LOCALE_CURRENCY_LIST is empty and LOCALE_CURRENCY_DEFAULT not set")?,
        };

        let config = Self {
            lang_list,
            currency_list,
            currency_default,
            fallback_locale: std::env::var("APP_FALLBACK_LOCALE")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| "en".to_string()),

            data_dir: std::env::var("LOCALE_DATA_DIR")
                .unwrap_or_else(|_| "data/locale".to_string())
                .into(),
            vendor_dir: std::env::var("LOCALE_VENDOR_DIR")
                .unwrap_or_else(|_| "vendor".to_string())
                .into(),

            app_url: std::env::var("APP_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        };

        config
            .locale_settings()
            .validate()
            .context("Invalid locale configuration")?;

        Ok(config)
    }

    /// The subset of configuration shared by the generator and the locale service.
    pub fn locale_settings(&self) -> LocaleSettings {
        LocaleSettings {
            lang_list: self.lang_list.clone(),
            currency_list: self.currency_list.clone(),
            currency_default: self.currency_default.clone(),
            lang_default: self.fallback_locale.clone(),
        }
    }
}

/// Split a comma-separated environment value, dropping blanks and duplicates
/// while keeping the first-seen order.
fn parse_list(raw: &str) -> Vec<String> {
    let mut list: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !list.iter().any(|existing| existing == item) {
            list.push(item.to_string());
        }
    }
    list
}
