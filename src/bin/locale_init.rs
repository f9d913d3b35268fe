//! Locale init - generates all locale data from the configured language and currency lists
//!
//! Usage:
//!   cargo run --bin locale-init
//!
//! Reads the umpirsky country/currency/language packages from LOCALE_VENDOR_DIR
//! (defaults to `vendor`) and writes the tables to LOCALE_DATA_DIR (defaults to
//! `data/locale`), replacing anything already there.
//!
//! Optional:
//! - LOCALE_LANG_LIST (defaults to en)
//! - LOCALE_CURRENCY_LIST (defaults to USD)
//! - APP_FALLBACK_LOCALE (defaults to en)

use anyhow::{Context, Result};
use route_locale::config::Config;
use route_locale::generator;
use route_locale::LocaleError;
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("route_locale=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    info!(
        "Generating locale data: languages {:?}, currencies {:?}",
        config.lang_list, config.currency_list
    );

    let report = match generator::generate(
        &config.vendor_dir,
        &config.data_dir,
        &config.lang_list,
        &config.currency_list,
    ) {
        Ok(report) => report,
        Err(e @ LocaleError::MissingDependency { .. }) => {
            eprintln!("Error: {}!", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Locale data generation failed"),
    };

    for lang in &report.languages {
        info!(
            "  {}: {} countries, {} currencies, {} languages",
            lang.lang, lang.countries, lang.currencies, lang.languages
        );
    }
    info!(
        "✓ Wrote {} languages ({} known codes) to {}",
        report.languages.len(),
        report.known_languages,
        config.data_dir.display()
    );

    Ok(())
}
