use crate::error::{LocaleError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static PARAM_REGEX: OnceLock<Regex> = OnceLock::new();

/// Named routes of the host application, used to build URLs by name.
///
/// Paths use `{param}` placeholders, e.g. `/product/{id}`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    base_url: String,
    routes: HashMap<String, String>,
}

impl RouteTable {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            routes: HashMap::new(),
        }
    }

    /// Register a named route
    pub fn with_route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.routes.insert(name.into(), path.into());
        self
    }

    /// Build the URL of a named route.
    ///
    /// Parameters matching a placeholder are substituted, the rest are appended
    /// as a query string in the order given. `absolute` prepends the base URL.
    pub fn url(&self, name: &str, params: &[(&str, &str)], absolute: bool) -> Result<String> {
        let template = self
            .routes
            .get(name)
            .ok_or_else(|| LocaleError::UnknownRoute(name.to_string()))?;

        let regex = PARAM_REGEX.get_or_init(|| Regex::new(r"\{(\w+)\}").unwrap());

        let mut used = Vec::new();
        let mut path = String::with_capacity(template.len());
        let mut last_end = 0;

        for cap in regex.captures_iter(template) {
            let (Some(whole), Some(param)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            let value = params
                .iter()
                .find(|(key, _)| *key == param.as_str())
                .map(|(_, value)| *value)
                .ok_or_else(|| LocaleError::MissingRouteParam {
                    route: name.to_string(),
                    param: param.as_str().to_string(),
                })?;

            path.push_str(&template[last_end..whole.start()]);
            path.push_str(value);
            used.push(param.as_str());
            last_end = whole.end();
        }
        path.push_str(&template[last_end..]);

        let query: Vec<String> = params
            .iter()
            .filter(|(key, _)| !used.contains(key))
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query.join("&"));
        }

        if absolute {
            Ok(format!("{}{}", self.base_url, path))
        } else {
            Ok(path)
        }
    }
}
