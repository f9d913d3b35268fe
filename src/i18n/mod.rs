//! Locale lookups and request-scoped language state.
//!
//! # Architecture
//!
//! - `tables`: typed in-memory form of the generated locale data
//! - `service`: process-wide queries over supported languages, currencies and countries
//! - `locale`: the current language of one request
//! - `url`: language path-segment helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use route_locale::i18n::{Locale, LocaleService, LocaleTables};
//!
//! let tables = LocaleTables::load(&config.data_dir, &config.lang_list)?;
//! let service = Arc::new(LocaleService::new(config.locale_settings(), tables)?);
//!
//! let mut locale = Locale::new(service.clone());
//! locale.set_lang_from_route("/fr/shop");
//! let languages = service.lang_list(&[], Some(locale.lang_current()), true);
//! ```

mod locale;
mod service;
mod tables;
pub mod url;

pub use locale::Locale;
pub use service::{CurrencyItem, LangItem, LocaleService, LocaleSettings, RouteLangItem};
pub use tables::{lookup_key, LangTables, LocaleTables, NameTable};

pub(crate) use service::check_lang_codes;
pub(crate) use tables::{read_json, write_json};
pub(crate) use tables::{ALL_LANGS_FILE, COUNTRY_FILE, CURRENCY_FILE, LANG_FILE};
