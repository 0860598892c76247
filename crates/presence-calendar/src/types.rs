//! Calendar API types and the shaped meeting state.

use serde::{Deserialize, Serialize};

/// Current-meeting state shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarState {
    pub event_name: Option<String>,
    pub is_video_meeting: bool,
}

impl CalendarState {
    /// Sentinel state when no configured calendar has a current event.
    pub fn idle() -> Self {
        Self {
            event_name: None,
            is_video_meeting: false,
        }
    }
}

// API Response Types

/// Google Calendar API event, trimmed to the fields the scan needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub status: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub start: Option<ApiEventTime>,
    pub end: Option<ApiEventTime>,
    pub conference_data: Option<ConferenceData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceData {
    #[serde(default)]
    pub entry_points: Vec<EntryPoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    pub entry_point_type: Option<String>,
    pub uri: Option<String>,
}

/// API response for the events list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    #[serde(default)]
    pub items: Vec<ApiEvent>,
}
