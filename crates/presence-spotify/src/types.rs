//! Spotify API types and the shaped track info.

use serde::{Deserialize, Serialize};

/// Now-playing track shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub track_title: String,
    pub album_name: String,
    pub track_image_url: String,
}

impl TrackInfo {
    /// Shape the playing item for display. Missing optional fields degrade
    /// to absent or empty values instead of failing the call.
    pub fn from_playing(playing: &CurrentlyPlayingTrack) -> Option<Self> {
        let item = playing.item.as_ref()?;
        Some(Self {
            track_title: item.name.clone(),
            album_name: item.album.name.clone(),
            track_image_url: item
                .album
                .images
                .first()
                .map(|image| image.url.clone())
                .unwrap_or_default(),
        })
    }
}

/// Top-tracks endpoint result: the decoded page when the body parsed,
/// plus the upstream status code.
#[derive(Debug, Clone, Serialize)]
pub struct TopTracks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<TracksPage>,
    pub status: u16,
}

// API Response Types

/// Currently-playing response, trimmed to the fields we display. `item`
/// is absent during ads and between tracks.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingTrack {
    pub item: Option<PlayingItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayingItem {
    pub name: String,
    pub album: Album,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Spotify paging object, trimmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<Track>,
    pub total: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Option<Album>,
    pub external_urls: Option<ExternalUrls>,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}
