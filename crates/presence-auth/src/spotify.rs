//! Spotify token refresher.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::refresh::TokenRefresher;

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Refreshes Spotify access tokens using HTTP Basic client authentication.
///
/// The Basic credential is encoded once at construction and carried in the
/// struct, rather than recomputed from ambient state per request.
#[derive(Debug, Clone)]
pub struct SpotifyRefresher {
    client: reqwest::Client,
    basic: String,
    refresh_token: String,
    token_url: String,
}

impl SpotifyRefresher {
    pub fn new(client_id: &str, client_secret: &str, refresh_token: String) -> Self {
        Self::new_with_token_url(
            client_id,
            client_secret,
            refresh_token,
            SPOTIFY_TOKEN_URL.to_string(),
        )
    }

    /// Construct against a non-default token endpoint (used by tests).
    pub fn new_with_token_url(
        client_id: &str,
        client_secret: &str,
        refresh_token: String,
        token_url: String,
    ) -> Self {
        let basic = STANDARD.encode(format!("{}:{}", client_id, client_secret));
        Self {
            client: reqwest::Client::new(),
            basic,
            refresh_token,
            token_url,
        }
    }
}

impl TokenRefresher for SpotifyRefresher {
    fn service_id(&self) -> &str {
        "spotify"
    }

    fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    async fn request_grant(&self) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(&self.token_url)
            .header("Authorization", format!("Basic {}", self.basic))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.as_str()),
            ])
            .send()
            .await
    }
}
