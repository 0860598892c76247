//! Google Calendar API client.

use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::error::CalendarError;
use crate::types::EventListResponse;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct CalendarClient {
    client: reqwest::Client,
    base_url: String,
}

impl CalendarClient {
    pub fn new() -> Self {
        Self::new_with_base_url(CALENDAR_API_BASE)
    }

    /// Construct against a non-default API base (used by tests).
    pub fn new_with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// List upcoming events from a calendar, earliest first.
    #[instrument(skip(self, access_token), level = "info")]
    pub async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        max_results: u32,
    ) -> Result<EventListResponse, CalendarError> {
        let url = format!(
            "{}/calendars/{}/events?timeMin={}&maxResults={}&singleEvents=true&orderBy=startTime",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(&time_min.to_rfc3339()),
            max_results,
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CalendarError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CalendarError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(CalendarError::TokenExpired)
        } else if status.as_u16() == 403 {
            Err(CalendarError::AuthRequired)
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(CalendarError::RateLimited(retry_after))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::ApiError(format!("{}: {}", status, text)))
        }
    }
}

impl Default for CalendarClient {
    fn default() -> Self {
        Self::new()
    }
}
