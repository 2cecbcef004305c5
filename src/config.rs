use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "data/hours.sqlite";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    /// Base URL of a remote hours API. When unset the pages use the local store.
    pub api_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: resolve_port(),
            db_path: resolve_db_path(),
            api_url: env::var("HOURS_API_URL")
                .ok()
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        }
    }
}

pub fn resolve_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub fn resolve_db_path() -> PathBuf {
    match env::var("HOURS_DB_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DB_PATH),
    }
}
