//! Calendar-specific error types.

use presence_auth::{AuthError, Refreshable};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Authentication required")]
    AuthRequired,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl Refreshable for CalendarError {
    fn should_refresh_token(&self) -> bool {
        match self {
            Self::TokenExpired | Self::AuthRequired | Self::Network(_) => true,
            Self::Auth(err) => err.should_refresh_token(),
            Self::RateLimited(_) | Self::ApiError(_) => false,
        }
    }
}
