//! Service configuration read from environment variables.
//!
//! Provider credentials are required at startup; missing variables are
//! reported together in a single error so a misconfigured deployment fails
//! fast with the full list instead of one name per restart.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variables that must be present for the service to start.
const REQUIRED_VARS: [&str; 7] = [
    "CALENDAR_IDS",
    "CALENDAR_CLIENT_ID",
    "CALENDAR_CLIENT_SECRET",
    "CALENDAR_REFRESH_TOKEN",
    "SPOTIFY_CLIENT_ID",
    "SPOTIFY_CLIENT_SECRET",
    "SPOTIFY_REFRESH_TOKEN",
];

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PATH: &str = "presence.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub calendar: CalendarConfig,
    pub spotify: SpotifyConfig,
    pub server: ServerConfig,
}

/// Google Calendar credentials and the calendars to scan.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    /// Calendar ids checked in order when looking for a current meeting.
    pub calendar_ids: Vec<String>,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Spotify client credentials.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind on 127.0.0.1.
    pub port: u16,

    /// Path of the SQLite token store.
    pub db_path: PathBuf,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an injectable variable lookup.
    ///
    /// Tests pass a map-backed lookup here to avoid mutating process-global
    /// environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| lookup(name).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing.join(", ")));
        }

        // All required names verified present above.
        let get = |name: &str| lookup(name).unwrap_or_default();

        let calendar_ids = parse_calendar_ids(&get("CALENDAR_IDS"))?;

        let port = match lookup("PRESENCE_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                ConfigError::Invalid(format!("PRESENCE_PORT is not a valid port: {}", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let db_path = lookup("PRESENCE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        Ok(Self {
            calendar: CalendarConfig {
                calendar_ids,
                client_id: get("CALENDAR_CLIENT_ID"),
                client_secret: get("CALENDAR_CLIENT_SECRET"),
                refresh_token: get("CALENDAR_REFRESH_TOKEN"),
            },
            spotify: SpotifyConfig {
                client_id: get("SPOTIFY_CLIENT_ID"),
                client_secret: get("SPOTIFY_CLIENT_SECRET"),
                refresh_token: get("SPOTIFY_REFRESH_TOKEN"),
            },
            server: ServerConfig { port, db_path },
        })
    }
}

fn parse_calendar_ids(raw: &str) -> Result<Vec<String>, ConfigError> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(ConfigError::Invalid(
            "CALENDAR_IDS must contain at least one calendar id".to_string(),
        ));
    }

    Ok(ids)
}
