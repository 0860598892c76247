//! Spotify-specific error types.

use presence_auth::{AuthError, Refreshable};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("Token expired")]
    TokenExpired,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl Refreshable for SpotifyError {
    fn should_refresh_token(&self) -> bool {
        match self {
            Self::TokenExpired | Self::Network(_) => true,
            Self::Auth(err) => err.should_refresh_token(),
            Self::ApiError(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_refresh_token() {
        assert!(SpotifyError::TokenExpired.should_refresh_token());
        assert!(SpotifyError::Auth(AuthError::TokenNotFound).should_refresh_token());
        assert!(!SpotifyError::ApiError("boom".into()).should_refresh_token());
    }
}
