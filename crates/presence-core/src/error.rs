//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required environment variables are unset. The message
    /// lists every missing name so a misconfigured deployment can be fixed
    /// in one pass.
    #[error("Missing required environment variables: {0}")]
    MissingEnv(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_message_lists_names() {
        let err = ConfigError::MissingEnv("CALENDAR_IDS, SPOTIFY_CLIENT_ID".to_string());
        let msg = err.to_string();
        assert!(msg.contains("CALENDAR_IDS"));
        assert!(msg.contains("SPOTIFY_CLIENT_ID"));
    }
}
