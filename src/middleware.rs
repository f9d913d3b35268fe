//! Session and language-prefix redirect middleware.
//!
//! [`attach_session`] resolves the visitor's session from the session cookie.
//! [`locale_redirect`] looks at the first path segment of each request:
//!
//! - not a known language code: the request passes through untouched
//! - the default language: redirect (302) to the same URL without the prefix
//! - a supported language: remember it in the session and pass through
//! - a known but unsupported language: 406 Not Acceptable
//!
//! Requests that pass through carry a resolved [`Locale`] in their extensions.

use crate::i18n::{url, Locale, LocaleService};
use crate::session::{
    session_id_from_headers, Session, SessionStore, SESSION_COOKIE, SESSION_LANG_KEY,
};
use axum::extract::{Request, State};
use axum::http::header::{LOCATION, SET_COOKIE, VARY};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{debug, warn};

/// Install with `axum::middleware::from_fn_with_state(service, locale_redirect)`.
pub async fn locale_redirect(
    State(service): State<Arc<LocaleService>>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    if let Some(lang) = url::first_segment(&path).filter(|lang| service.is_lang_correct(lang)) {
        if lang == service.lang_default() {
            if let Some(session) = req.extensions().get::<Session>() {
                session.reflash();
            }

            let target = service.url_without_lang(&req.uri().to_string());
            debug!("Redirecting default-language URL {} to {}", req.uri(), target);
            return (
                StatusCode::FOUND,
                [(LOCATION, target), (VARY, "Accept-Language".to_string())],
            )
                .into_response();
        }

        if !service.is_lang_supported(lang) {
            warn!("Rejecting unsupported language '{}' in {}", lang, path);
            return StatusCode::NOT_ACCEPTABLE.into_response();
        }

        if let Some(session) = req.extensions().get::<Session>() {
            session.insert(SESSION_LANG_KEY, lang);
        }
    }

    let mut locale = Locale::new(service);
    locale.set_lang_from_route(&path);
    req.extensions_mut().insert(locale);

    next.run(req).await
}

/// Put the visitor's [`Session`] into the request extensions, starting a new
/// session (and setting the cookie) when the request carries no known id.
/// Flash data is aged once the response is produced.
///
/// Install with `axum::middleware::from_fn_with_state(store, attach_session)`,
/// outside [`locale_redirect`].
pub async fn attach_session(
    State(store): State<SessionStore>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = session_id_from_headers(req.headers())
        .and_then(|id| store.get(&id).map(|session| (id, session)));

    let (id, session, is_new) = match existing {
        Some((id, session)) => (id, session, false),
        None => {
            let (id, session) = store.create();
            debug!("Started session {}", id);
            (id, session, true)
        }
    };

    req.extensions_mut().insert(session.clone());
    let mut response = next.run(req).await;
    session.age_flash();

    if is_new {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!("Invalid session cookie for {}: {}", id, e),
        }
    }

    response
}
