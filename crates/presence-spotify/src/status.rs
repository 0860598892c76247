//! Token-guarded now-playing and top-tracks lookups.

use presence_auth::{with_token_refresh, SpotifyRefresher, TokenStore};

use crate::client::SpotifyClient;
use crate::error::SpotifyError;
use crate::types::{TopTracks, TrackInfo};

/// What is playing right now, shaped for display. `None` when nothing is
/// playing.
pub async fn now_playing(
    client: &SpotifyClient,
    store: &TokenStore,
    refresher: &SpotifyRefresher,
) -> Result<Option<TrackInfo>, SpotifyError> {
    let playing = with_token_refresh(store, refresher, |access_token| async move {
        client.now_playing(&access_token).await
    })
    .await?;

    Ok(playing.as_ref().and_then(TrackInfo::from_playing))
}

/// The long-term top tracks with the upstream status code.
pub async fn top_tracks(
    client: &SpotifyClient,
    store: &TokenStore,
    refresher: &SpotifyRefresher,
) -> Result<TopTracks, SpotifyError> {
    with_token_refresh(store, refresher, |access_token| async move {
        client.top_tracks(&access_token).await
    })
    .await
}
