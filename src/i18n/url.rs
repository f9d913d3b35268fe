//! Language path-segment helpers for absolute and path-only URLs.

use crate::error::{LocaleError, Result};
use url::Url;

/// A URL whose path can be rewritten: either absolute, or a path with an
/// optional query and fragment as found in request URIs.
#[derive(Debug)]
enum ParsedUrl {
    Absolute(Url),
    Path { path: String, tail: String },
}

impl ParsedUrl {
    fn parse(raw: &str) -> Result<Self> {
        match Url::parse(raw) {
            Ok(url) if !url.cannot_be_a_base() => Ok(Self::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) if raw.starts_with('/') => {
                let split = raw.find(['?', '#']).unwrap_or(raw.len());
                Ok(Self::Path {
                    path: raw[..split].to_string(),
                    tail: raw[split..].to_string(),
                })
            }
            Ok(_) => Err(LocaleError::InvalidUrl {
                url: raw.to_string(),
                reason: "URL has no path".to_string(),
            }),
            Err(e) => Err(LocaleError::InvalidUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn path(&self) -> &str {
        match self {
            Self::Absolute(url) => url.path(),
            Self::Path { path, .. } => path,
        }
    }

    fn set_path(&mut self, new_path: &str) {
        match self {
            Self::Absolute(url) => url.set_path(new_path),
            Self::Path { path, .. } => *path = new_path.to_string(),
        }
    }

    fn build(self) -> String {
        match self {
            Self::Absolute(url) => url.into(),
            Self::Path { path, tail } => format!("{}{}", path, tail),
        }
    }
}

/// First non-empty segment of a path (`/fr/shop` -> `fr`).
pub fn first_segment(path: &str) -> Option<&str> {
    path.split('/').find(|segment| !segment.is_empty())
}

/// Remove the first path segment when `is_lang` accepts it.
///
/// Unparseable URLs and URLs whose first segment is not a language come back unchanged.
pub fn strip_lang_segment(url: &str, is_lang: impl Fn(&str) -> bool) -> String {
    let Ok(mut parsed) = ParsedUrl::parse(url) else {
        return url.to_string();
    };

    let path = parsed.path().to_string();
    let Some(segment) = first_segment(&path) else {
        return url.to_string();
    };
    if !is_lang(segment) {
        return url.to_string();
    }

    let start = path.find(segment).unwrap_or(0);
    let rest = path[start + segment.len()..].trim_start_matches('/');
    parsed.set_path(&format!("/{}", rest));
    parsed.build()
}

/// Insert `/{lang}` in front of the URL path.
pub fn prefix_lang(url: &str, lang: &str) -> Result<String> {
    let mut parsed = ParsedUrl::parse(url)?;
    let path = match parsed.path() {
        "" | "/" => format!("/{}", lang),
        path => format!("/{}{}", lang, path),
    };
    parsed.set_path(&path);
    Ok(parsed.build())
}
