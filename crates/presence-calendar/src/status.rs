//! Meeting-state shaping and the per-calendar scan.

use chrono::{DateTime, NaiveDate, Utc};
use presence_auth::{with_token_refresh, GoogleRefresher, TokenStore};

use crate::client::CalendarClient;
use crate::error::CalendarError;
use crate::types::{ApiEvent, ApiEventTime, CalendarState};

const UNTITLED_EVENT: &str = "(No title)";

/// Scan the configured calendars in order and return the state of the
/// first one whose next event is confirmed and spans the current instant.
///
/// Calendars without a current event fall through to the next id; if none
/// match, the idle sentinel state is returned rather than an error. Each
/// calendar fetch is token-guarded: an auth failure refreshes the stored
/// token once and retries.
pub async fn current_meeting_state(
    client: &CalendarClient,
    store: &TokenStore,
    refresher: &GoogleRefresher,
    calendar_ids: &[String],
) -> Result<CalendarState, CalendarError> {
    let now = Utc::now();

    for calendar_id in calendar_ids {
        let response = with_token_refresh(store, refresher, |access_token| async move {
            client.list_events(&access_token, calendar_id, now, 1).await
        })
        .await?;

        if let Some(event) = response.items.first() {
            if is_current(event, now) {
                return Ok(event_state(event));
            }
        }

        tracing::debug!("No current event in calendar {}", calendar_id);
    }

    Ok(CalendarState::idle())
}

/// Whether the event is confirmed and its range contains `now`.
fn is_current(event: &ApiEvent, now: DateTime<Utc>) -> bool {
    if event.status.as_deref() != Some("confirmed") {
        return false;
    }

    let (Some(start), Some(end)) = (
        event.start.as_ref().and_then(parse_event_time),
        event.end.as_ref().and_then(parse_event_time),
    ) else {
        return false;
    };

    now >= start && now <= end
}

/// Shape a current event for display.
fn event_state(event: &ApiEvent) -> CalendarState {
    CalendarState {
        event_name: Some(
            event
                .summary
                .clone()
                .unwrap_or_else(|| UNTITLED_EVENT.to_string()),
        ),
        is_video_meeting: has_video(event),
    }
}

/// Whether any conference entry point is a video link, or the location
/// points at a Zoom meeting.
fn has_video(event: &ApiEvent) -> bool {
    let conference_video = event
        .conference_data
        .as_ref()
        .map(|data| {
            data.entry_points
                .iter()
                .any(|entry| entry.entry_point_type.as_deref() == Some("video"))
        })
        .unwrap_or(false);

    conference_video
        || event
            .location
            .as_deref()
            .map(|location| location.contains("zoom.us"))
            .unwrap_or(false)
}

/// Event times carry either a datetime or an all-day date; all-day dates
/// count from midnight UTC.
fn parse_event_time(time: &ApiEventTime) -> Option<DateTime<Utc>> {
    if let Some(date_time) = &time.date_time {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(date_time) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    if let Some(date) = &time.date {
        if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn event_json(status: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> serde_json::Value {
        serde_json::json!({
            "status": status,
            "summary": "Team Sync",
            "start": {"dateTime": start.to_rfc3339()},
            "end": {"dateTime": end.to_rfc3339()}
        })
    }

    fn parse_event(value: serde_json::Value) -> ApiEvent {
        serde_json::from_value(value).unwrap()
    }

    fn current_event() -> ApiEvent {
        let now = Utc::now();
        parse_event(event_json(
            "confirmed",
            now - Duration::minutes(30),
            now + Duration::minutes(30),
        ))
    }

    #[test]
    fn test_confirmed_spanning_event_is_current() {
        assert!(is_current(&current_event(), Utc::now()));
    }

    #[test]
    fn test_tentative_event_is_skipped() {
        let now = Utc::now();
        let event = parse_event(event_json(
            "tentative",
            now - Duration::minutes(30),
            now + Duration::minutes(30),
        ));
        assert!(!is_current(&event, now));
    }

    #[test]
    fn test_past_event_is_skipped() {
        let now = Utc::now();
        let event = parse_event(event_json(
            "confirmed",
            now - Duration::hours(2),
            now - Duration::hours(1),
        ));
        assert!(!is_current(&event, now));
    }

    #[test]
    fn test_all_day_event_spanning_today_is_current() {
        let now = Utc::now();
        let event = parse_event(serde_json::json!({
            "status": "confirmed",
            "summary": "Offsite",
            "start": {"date": (now - Duration::days(1)).format("%Y-%m-%d").to_string()},
            "end": {"date": (now + Duration::days(1)).format("%Y-%m-%d").to_string()}
        }));
        assert!(is_current(&event, now));
    }

    #[test]
    fn test_event_without_times_is_skipped() {
        let event = parse_event(serde_json::json!({
            "status": "confirmed",
            "summary": "Floating"
        }));
        assert!(!is_current(&event, Utc::now()));
    }

    #[test]
    fn test_untitled_event_gets_placeholder_name() {
        let now = Utc::now();
        let event = parse_event(serde_json::json!({
            "status": "confirmed",
            "start": {"dateTime": (now - Duration::minutes(5)).to_rfc3339()},
            "end": {"dateTime": (now + Duration::minutes(5)).to_rfc3339()}
        }));

        let state = event_state(&event);
        assert_eq!(state.event_name.as_deref(), Some("(No title)"));
        assert!(!state.is_video_meeting);
    }

    #[test]
    fn test_video_detected_from_conference_entry_point() {
        let mut value = event_json(
            "confirmed",
            Utc::now() - Duration::minutes(5),
            Utc::now() + Duration::minutes(5),
        );
        value["conferenceData"] = serde_json::json!({
            "entryPoints": [
                {"entryPointType": "phone", "uri": "tel:+1-555-0100"},
                {"entryPointType": "video", "uri": "https://meet.google.com/abc"}
            ]
        });

        let state = event_state(&parse_event(value));
        assert!(state.is_video_meeting);
    }

    #[test]
    fn test_video_detected_from_zoom_location() {
        let mut value = event_json(
            "confirmed",
            Utc::now() - Duration::minutes(5),
            Utc::now() + Duration::minutes(5),
        );
        value["location"] = serde_json::json!("https://example.zoom.us/j/123456");

        let state = event_state(&parse_event(value));
        assert!(state.is_video_meeting);
    }

    #[test]
    fn test_plain_location_is_not_video() {
        let mut value = event_json(
            "confirmed",
            Utc::now() - Duration::minutes(5),
            Utc::now() + Duration::minutes(5),
        );
        value["location"] = serde_json::json!("Conference Room B");

        let state = event_state(&parse_event(value));
        assert!(!state.is_video_meeting);
    }

    fn refresher(server: &MockServer) -> GoogleRefresher {
        GoogleRefresher::new_with_token_url(
            "client-id".to_string(),
            "client-secret".to_string(),
            "refresh-token".to_string(),
            format!("{}/token", server.uri()),
        )
    }

    fn seeded_store() -> TokenStore {
        let store = TokenStore::in_memory().unwrap();
        store.upsert("refresh-token", "test_token", i64::MAX).unwrap();
        store
    }

    #[tokio::test]
    async fn test_scan_falls_through_to_second_calendar() {
        let server = MockServer::start().await;
        let now = Utc::now();

        Mock::given(method("GET"))
            .and(path("/calendars/empty/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": []
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/calendars/busy/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [event_json("confirmed", now - Duration::minutes(10), now + Duration::minutes(10))]
            })))
            .mount(&server)
            .await;

        let client = CalendarClient::new_with_base_url(&server.uri());
        let store = seeded_store();
        let ids = vec!["empty".to_string(), "busy".to_string()];

        let state = current_meeting_state(&client, &store, &refresher(&server), &ids)
            .await
            .unwrap();

        assert_eq!(state.event_name.as_deref(), Some("Team Sync"));
    }

    #[tokio::test]
    async fn test_scan_with_no_current_events_is_idle() {
        let server = MockServer::start().await;
        let now = Utc::now();

        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [event_json("confirmed", now + Duration::hours(1), now + Duration::hours(2))]
            })))
            .mount(&server)
            .await;

        let client = CalendarClient::new_with_base_url(&server.uri());
        let store = seeded_store();
        let ids = vec!["primary".to_string()];

        let state = current_meeting_state(&client, &store, &refresher(&server), &ids)
            .await
            .unwrap();

        assert_eq!(state, CalendarState::idle());
    }

    #[tokio::test]
    async fn test_scan_refreshes_rejected_token_once() {
        let server = MockServer::start().await;
        let now = Utc::now();

        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .and(header("Authorization", "Bearer stale_token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .and(header("Authorization", "Bearer fresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [event_json("confirmed", now - Duration::minutes(10), now + Duration::minutes(10))]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh_token",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CalendarClient::new_with_base_url(&server.uri());
        let store = TokenStore::in_memory().unwrap();
        store.upsert("refresh-token", "stale_token", i64::MAX).unwrap();
        let ids = vec!["primary".to_string()];

        let state = current_meeting_state(&client, &store, &refresher(&server), &ids)
            .await
            .unwrap();

        assert_eq!(state.event_name.as_deref(), Some("Team Sync"));
        let stored = store.find("refresh-token").unwrap().unwrap();
        assert_eq!(stored.access_token, "fresh_token");
    }

    #[tokio::test]
    async fn test_scan_propagates_second_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh_token",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CalendarClient::new_with_base_url(&server.uri());
        let store = seeded_store();
        let ids = vec!["primary".to_string()];

        let result = current_meeting_state(&client, &store, &refresher(&server), &ids).await;

        assert!(matches!(result, Err(CalendarError::TokenExpired)));
    }
}
