use anyhow::{Context, Result};
use route_locale::config::Config;
use route_locale::i18n::{LocaleService, LocaleTables};
use route_locale::server;
use route_locale::session::SessionStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("route_locale=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    info!("Loading locale data from {}", config.data_dir.display());
    let tables = LocaleTables::load(&config.data_dir, &config.lang_list)
        .context("Failed to load locale data (run `locale-init` first)")?;
    let service = Arc::new(LocaleService::new(config.locale_settings(), tables)?);
    info!(
        "Supported languages: {:?} (default '{}')",
        service.lang_supported_list(),
        service.lang_default()
    );

    let routes = Arc::new(server::route_table(&config.app_url));
    let app = server::app(service, routes, SessionStore::new());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
