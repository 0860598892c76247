//! Shared state handed to every request handler.

use std::sync::Arc;

use presence_auth::{AuthError, GoogleRefresher, SpotifyRefresher, TokenStore};
use presence_calendar::CalendarClient;
use presence_core::Config;
use presence_spotify::SpotifyClient;

/// Everything a handler needs, computed once at startup from the config
/// and passed explicitly. There is no other process-wide state.
pub struct AppState {
    pub store: TokenStore,
    pub calendar_ids: Vec<String>,
    pub calendar_client: CalendarClient,
    pub google: GoogleRefresher,
    pub spotify_client: SpotifyClient,
    pub spotify: SpotifyRefresher,
}

impl AppState {
    /// Build the state from configuration, opening the token store.
    pub fn from_config(config: &Config) -> Result<Arc<Self>, AuthError> {
        let store = TokenStore::new(&config.server.db_path)?;

        Ok(Arc::new(Self {
            store,
            calendar_ids: config.calendar.calendar_ids.clone(),
            calendar_client: CalendarClient::new(),
            google: GoogleRefresher::new(
                config.calendar.client_id.clone(),
                config.calendar.client_secret.clone(),
                config.calendar.refresh_token.clone(),
            ),
            spotify_client: SpotifyClient::new(),
            spotify: SpotifyRefresher::new(
                &config.spotify.client_id,
                &config.spotify.client_secret,
                config.spotify.refresh_token.clone(),
            ),
        }))
    }
}
