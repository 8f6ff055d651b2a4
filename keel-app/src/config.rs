//! Configuration loading from environment.

use std::env;

/// Server configuration.
pub struct Config {
    pub port: u16,
    pub title: String,
    pub debug: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let title = env::var("APP_TITLE").unwrap_or_else(|_| "Keel Demo".to_string());

        let debug = env::var("APP_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self { port, title, debug })
    }
}
