//! Spotify integration for Presence.
//!
//! Surfaces the currently playing track and the long-term top tracks.

pub mod client;
pub mod error;
pub mod status;
pub mod types;

pub use client::SpotifyClient;
pub use error::SpotifyError;
pub use status::{now_playing, top_tracks};
pub use types::{TopTracks, TrackInfo};
