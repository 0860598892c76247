//! Google token refresher.

use crate::refresh::TokenRefresher;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Refreshes Google access tokens with a form-encoded client-credential
/// grant against the Google OAuth2 token endpoint.
#[derive(Debug, Clone)]
pub struct GoogleRefresher {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_url: String,
}

impl GoogleRefresher {
    pub fn new(client_id: String, client_secret: String, refresh_token: String) -> Self {
        Self::new_with_token_url(
            client_id,
            client_secret,
            refresh_token,
            GOOGLE_TOKEN_URL.to_string(),
        )
    }

    /// Construct against a non-default token endpoint (used by tests).
    pub fn new_with_token_url(
        client_id: String,
        client_secret: String,
        refresh_token: String,
        token_url: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
            client_secret,
            refresh_token,
            token_url,
        }
    }
}

impl TokenRefresher for GoogleRefresher {
    fn service_id(&self) -> &str {
        "google"
    }

    fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    async fn request_grant(&self) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
    }
}
