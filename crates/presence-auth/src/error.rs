//! Auth error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No token record exists for the refresh token. Treated as a refresh
    /// trigger by the token guard.
    #[error("token not found")]
    TokenNotFound,

    /// The provider rejected the refresh grant; carries the provider's
    /// error description.
    #[error("Failed to refresh token: {0}")]
    RefreshFailed(String),

    #[error("Token store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_failed_surfaces_description() {
        let err = AuthError::RefreshFailed("invalid_grant".to_string());
        assert!(err.to_string().contains("invalid_grant"));
    }
}
