//! Request-scoped locale: the language active for one request.

use crate::error::Result;
use crate::i18n::{url, LocaleService};
use crate::routes::RouteTable;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::debug;

/// The current language of a request, resolved against the locale service.
///
/// Starts at the default language. The locale middleware resolves it from the
/// URL and stores it in the request extensions; handlers take it as an extractor.
#[derive(Debug, Clone)]
pub struct Locale {
    service: Arc<LocaleService>,
    current: String,
}

impl Locale {
    pub fn new(service: Arc<LocaleService>) -> Self {
        let current = service.lang_default().to_string();
        Self { service, current }
    }

    pub fn service(&self) -> &LocaleService {
        &self.service
    }

    pub fn lang_current(&self) -> &str {
        &self.current
    }

    /// Switch to `lang`, or to the default language when it is absent or unsupported.
    pub fn set_lang(&mut self, lang: Option<&str>) {
        let lang = self.service.resolve_lang(lang);
        if lang != self.current {
            debug!("Switching locale from '{}' to '{}'", self.current, lang);
            self.current = lang.to_string();
        }
    }

    /// Set the language from the first segment of `path`.
    ///
    /// Returns the segment when it is a correct language code, even if that
    /// language is not supported (the default is used then).
    pub fn set_lang_from_route(&mut self, path: &str) -> Option<String> {
        match url::first_segment(path) {
            Some(lang) if self.service.is_lang_correct(lang) => {
                let supported = self.service.is_lang_supported(lang);
                self.set_lang(supported.then_some(lang));
                Some(lang.to_string())
            }
            _ => {
                self.set_lang(None);
                None
            }
        }
    }

    /// URL of a named route in the current language.
    pub fn route(
        &self,
        routes: &RouteTable,
        name: &str,
        params: &[(&str, &str)],
        absolute: bool,
    ) -> Result<String> {
        let url = routes.url(name, params, absolute)?;
        if self.current == self.service.lang_default() {
            return Ok(url);
        }
        url::prefix_lang(&url, &self.current)
    }

    pub fn flag_current(&self) -> String {
        self.service.flag(&self.current)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts.extensions.get::<Locale>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "locale middleware is not installed",
        ))
    }
}
