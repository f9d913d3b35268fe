//! Demo application: a few pages served both with and without a language prefix.

use crate::i18n::{Locale, LocaleService};
use crate::middleware::{attach_session, locale_redirect};
use crate::routes::RouteTable;
use crate::session::{Session, SessionStore, SESSION_LANG_KEY};
use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
}

/// Named routes of the demo pages.
pub fn route_table(app_url: &str) -> RouteTable {
    RouteTable::new(app_url)
        .with_route("home", "/")
        .with_route("shop", "/shop")
        .with_route("countries", "/countries")
}

/// Build the router. Each visitor gets their own session from `sessions`.
pub fn app(service: Arc<LocaleService>, routes: Arc<RouteTable>, sessions: SessionStore) -> Router {
    let pages = Router::new()
        .route("/", get(home))
        .route("/shop", get(shop))
        .route("/countries", get(countries))
        .with_state(AppState { routes });

    Router::new()
        .merge(pages.clone())
        .nest("/:lang", pages)
        .layer(middleware::from_fn_with_state(service, locale_redirect))
        .layer(middleware::from_fn_with_state(sessions, attach_session))
        .layer(TraceLayer::new_for_http())
}

async fn home(locale: Locale, OriginalUri(uri): OriginalUri) -> Response {
    let service = locale.service();
    match service.route_lang_list(&uri.to_string()) {
        Ok(switcher) => Json(json!({
            "lang": locale.lang_current(),
            "flag": locale.flag_current(),
            "languages": service.lang_list(&[], Some(locale.lang_current()), true),
            "switcher": switcher,
        }))
        .into_response(),
        Err(e) => {
            error!("Failed to build language switcher: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn shop(
    locale: Locale,
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    let service = locale.service();
    match locale.route(&state.routes, "countries", &[], true) {
        Ok(countries_url) => Json(json!({
            "lang": locale.lang_current(),
            "session_lang": session.get(SESSION_LANG_KEY),
            "currency_default": service.currency_default(),
            "currencies": service.currency_list(&[], Some(locale.lang_current())),
            "countries_url": countries_url,
        }))
        .into_response(),
        Err(e) => {
            error!("Failed to build route: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn countries(locale: Locale) -> Json<serde_json::Value> {
    Json(json!({
        "lang": locale.lang_current(),
        "countries": locale.service().country_list(Some(locale.lang_current())),
    }))
}
