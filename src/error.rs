use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the locale library.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// One of the upstream umpirsky data packages is not present in the vendor directory.
    #[error("\"{package}\" package is not installed")]
    MissingDependency { package: &'static str },

    /// A per-language upstream file (or a generated table) could not be found.
    #[error("locale data file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("route not defined: {0}")]
    UnknownRoute(String),

    #[error("missing parameter '{param}' for route '{route}'")]
    MissingRouteParam { route: String, param: String },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid locale configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LocaleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dependency_message() {
        let err = LocaleError::MissingDependency {
            package: "umpirsky/country-list",
        };
        assert_eq!(
            err.to_string(),
            "\"umpirsky/country-list\" package is not installed"
        );
    }

    #[test]
    fn test_missing_route_param_message() {
        let err = LocaleError::MissingRouteParam {
            route: "product.show".to_string(),
            param: "id".to_string(),
        };
        assert!(err.to_string().contains("'id'"));
        assert!(err.to_string().contains("'product.show'"));
    }
}
