//! Spotify Web API client.

use tracing::instrument;

use crate::error::SpotifyError;
use crate::types::{CurrentlyPlayingTrack, TopTracks, TracksPage};

const SPOTIFY_API_BASE: &str = "https://api.spotify.com";

pub struct SpotifyClient {
    client: reqwest::Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new() -> Self {
        Self::new_with_base_url(SPOTIFY_API_BASE)
    }

    /// Construct against a non-default API base (used by tests).
    pub fn new_with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// The track currently playing on the account, or `None` when the
    /// player is idle (204) or rate limited.
    #[instrument(skip(self, access_token), level = "info")]
    pub async fn now_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<CurrentlyPlayingTrack>, SpotifyError> {
        let url = format!("{}/v1/me/player/currently-playing", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            204 => {
                tracing::debug!("No track currently playing");
                Ok(None)
            }
            429 => {
                tracing::warn!("Rate limited on the currently-playing endpoint");
                Ok(None)
            }
            401 => Err(SpotifyError::TokenExpired),
            _ if status.is_success() => {
                let playing = response.json().await.map_err(|e| {
                    SpotifyError::ApiError(format!("JSON parse error: {}", e))
                })?;
                Ok(Some(playing))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(SpotifyError::ApiError(format!("{}: {}", status, text)))
            }
        }
    }

    /// Fetch the long-term top tracks.
    ///
    /// The upstream status code is reported alongside the data; a body
    /// that fails to decode yields a wrapper with no data rather than an
    /// error.
    #[instrument(skip(self, access_token), level = "info")]
    pub async fn top_tracks(&self, access_token: &str) -> Result<TopTracks, SpotifyError> {
        let url = format!(
            "{}/v1/me/top/tracks?time_range=long_term&limit=10",
            self.base_url
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;

        let status = response.status().as_u16();
        if status == 401 {
            return Err(SpotifyError::TokenExpired);
        }
        if status == 204 {
            tracing::debug!("No top tracks available");
            return Ok(TopTracks { data: None, status });
        }

        match response.json::<TracksPage>().await {
            Ok(page) => Ok(TopTracks {
                data: Some(page),
                status,
            }),
            Err(err) => {
                tracing::warn!("Failed to decode top tracks response: {}", err);
                Ok(TopTracks { data: None, status })
            }
        }
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}
