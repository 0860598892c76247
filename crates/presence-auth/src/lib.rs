//! OAuth token persistence and refresh for the Presence service.
//!
//! Everything here serves one pattern: API calls run with a stored access
//! token, and an authentication failure triggers exactly one refresh-token
//! grant followed by one retry.

pub mod error;
pub mod google;
pub mod guard;
pub mod refresh;
pub mod spotify;
pub mod store;

pub use error::AuthError;
pub use google::GoogleRefresher;
pub use guard::{with_token_refresh, Refreshable};
pub use refresh::{refresh_access_token, TokenGrant, TokenRefresher};
pub use spotify::SpotifyRefresher;
pub use store::{StoredToken, TokenStore};
