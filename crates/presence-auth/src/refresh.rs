//! OAuth refresh-token grant exchange.

use chrono::Utc;
use serde::Deserialize;

use crate::error::AuthError;
use crate::store::TokenStore;

/// Safety margin subtracted from the provider-stated token lifetime, so a
/// token is never handed out in the instant it expires.
const EXPIRY_MARGIN_MS: i64 = 1_000;

/// Successful token-endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Error body returned by OAuth token endpoints.
#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

impl ErrorResponse {
    fn message(self) -> String {
        if self.error_description.is_empty() {
            self.error
        } else {
            self.error_description
        }
    }
}

/// A provider-specific refresh-grant request.
///
/// Implementations know how to authenticate against their token endpoint;
/// everything else (error surfacing, expiry math, persistence) is shared
/// by [`refresh_access_token`].
pub trait TokenRefresher {
    /// Short provider identifier used in logs (e.g. "google", "spotify").
    fn service_id(&self) -> &str;

    /// The long-lived refresh token identifying this credential.
    fn refresh_token(&self) -> &str;

    /// POST the refresh grant to the provider's token endpoint.
    async fn request_grant(&self) -> Result<reqwest::Response, reqwest::Error>;
}

/// Exchange the refresh token for a new access token and persist it.
///
/// A non-success response fails with the provider's error description. On
/// success the new token is upserted with expiry
/// `now + expires_in * 1000 - 1000` milliseconds, and returned.
pub async fn refresh_access_token<R: TokenRefresher>(
    store: &TokenStore,
    refresher: &R,
) -> Result<String, AuthError> {
    let response = refresher.request_grant().await?;

    if !response.status().is_success() {
        let details: ErrorResponse = response.json().await.unwrap_or_default();
        return Err(AuthError::RefreshFailed(details.message()));
    }

    let grant: TokenGrant = response.json().await?;
    let expires_at_ms =
        Utc::now().timestamp_millis() + (grant.expires_in as i64) * 1_000 - EXPIRY_MARGIN_MS;
    store.upsert(refresher.refresh_token(), &grant.access_token, expires_at_ms)?;

    tracing::info!("Refreshed {} access token", refresher.service_id());
    Ok(grant.access_token)
}
