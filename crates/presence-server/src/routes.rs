//! HTTP routes for the Presence endpoints.
//!
//! Each handler returns a JSON-serializable display object; integration
//! failures are logged and reported as a 500 with an error body, fatal for
//! that request only.

use std::convert::Infallible;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::state::AppState;

/// All service routes.
pub fn routes(
    state: Arc<AppState>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let calendar = warp::path!("calendar")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(calendar_state);

    let now_playing = warp::path!("spotify" / "now-playing")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(spotify_now_playing);

    let top_tracks = warp::path!("spotify" / "top-tracks")
        .and(warp::get())
        .and(with_state(state))
        .and_then(spotify_top_tracks);

    calendar.or(now_playing).or(top_tracks)
}

fn with_state(
    state: Arc<AppState>,
) -> impl Filter<Extract = (Arc<AppState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

async fn calendar_state(state: Arc<AppState>) -> Result<impl Reply, Infallible> {
    let result = presence_calendar::current_meeting_state(
        &state.calendar_client,
        &state.store,
        &state.google,
        &state.calendar_ids,
    )
    .await;

    match result {
        Ok(meeting_state) => Ok(json_reply(&meeting_state, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Calendar state lookup failed: {}", err);
            Ok(error_reply(&err))
        }
    }
}

async fn spotify_now_playing(state: Arc<AppState>) -> Result<impl Reply, Infallible> {
    let result =
        presence_spotify::now_playing(&state.spotify_client, &state.store, &state.spotify).await;

    match result {
        Ok(track) => Ok(json_reply(&track, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Now-playing lookup failed: {}", err);
            Ok(error_reply(&err))
        }
    }
}

async fn spotify_top_tracks(state: Arc<AppState>) -> Result<impl Reply, Infallible> {
    let result =
        presence_spotify::top_tracks(&state.spotify_client, &state.store, &state.spotify).await;

    match result {
        Ok(tracks) => Ok(json_reply(&tracks, StatusCode::OK)),
        Err(err) => {
            tracing::error!("Top-tracks lookup failed: {}", err);
            Ok(error_reply(&err))
        }
    }
}

fn json_reply<T: serde::Serialize>(
    value: &T,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(value), status)
}

fn error_reply(err: &dyn std::fmt::Display) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": err.to_string() })),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}
