pub mod config;
pub mod error;
pub mod generator;
pub mod i18n;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod session;

pub use error::{LocaleError, Result};
