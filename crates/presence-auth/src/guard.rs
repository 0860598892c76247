//! Token-guarded API calls: attempt, refresh once on auth failure, retry.

use std::future::Future;

use crate::error::AuthError;
use crate::refresh::{refresh_access_token, TokenRefresher};
use crate::store::TokenStore;

/// Classification of integration errors for the refresh-retry decision.
pub trait Refreshable {
    /// Whether this error should trigger a refresh-token grant and a retry.
    fn should_refresh_token(&self) -> bool;
}

impl Refreshable for AuthError {
    fn should_refresh_token(&self) -> bool {
        // A missing record or a transport failure warrants one refresh
        // attempt; a rejected grant or a store failure does not.
        matches!(self, AuthError::TokenNotFound | AuthError::Network(_))
    }
}

/// Run `call` with the stored access token, refreshing at most once.
///
/// The stored token is looked up by the refresher's refresh token; a
/// missing record counts as a refresh trigger. If the first attempt fails
/// with an error classified as refresh-worthy, a refresh grant runs, the
/// new token is persisted, and the call is retried exactly once. A second
/// failure propagates to the caller; so does any non-refresh-worthy error.
pub async fn with_token_refresh<T, E, R, F, Fut>(
    store: &TokenStore,
    refresher: &R,
    call: F,
) -> Result<T, E>
where
    R: TokenRefresher,
    E: From<AuthError> + Refreshable,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let first = match store.find(refresher.refresh_token()) {
        Ok(Some(token)) => call(token.access_token).await,
        Ok(None) => Err(E::from(AuthError::TokenNotFound)),
        Err(err) => return Err(E::from(err)),
    };

    match first {
        Ok(value) => Ok(value),
        Err(err) if err.should_refresh_token() => {
            tracing::debug!(
                "{} call failed with stale credentials, refreshing",
                refresher.service_id()
            );
            let access_token = refresh_access_token(store, refresher)
                .await
                .map_err(E::from)?;
            call(access_token).await
        }
        Err(err) => Err(err),
    }
}
