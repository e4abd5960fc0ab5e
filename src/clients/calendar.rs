use chrono::{TimeZone, Utc};
use serde::Serialize;
use tracing::error;

use crate::error::VpaError;
use crate::models::schedule::ResolvedSchedule;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// REST client for the Google Calendar v3 events-insert call.
pub struct CalendarClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Serialize)]
struct EventBody<'a> {
    summary: &'a str,
    start: EventInstant,
    end: EventInstant,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventInstant {
    date_time: String,
}

impl EventInstant {
    /// The wire format wants RFC3339; the core hands instants around as
    /// epoch milliseconds.
    fn from_millis(millis: i64) -> Self {
        let date_time = Utc
            .timestamp_millis_opt(millis)
            .single()
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        Self { date_time }
    }
}

impl CalendarClient {
    pub fn new(access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn insert_event(
        &self,
        calendar_id: &str,
        schedule: &ResolvedSchedule,
    ) -> Result<(), VpaError> {
        let url = format!(
            "{}/calendar/v3/calendars/{}/events",
            self.base_url, calendar_id
        );
        let body = EventBody {
            summary: &schedule.activity_label,
            start: EventInstant::from_millis(schedule.start_millis()),
            end: EventInstant::from_millis(schedule.end_millis()),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|err| VpaError::CalendarService(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, %body, "event insert returned an error status");
            return Err(VpaError::CalendarService(format!(
                "request failed with status {status}"
            )));
        }
        Ok(())
    }
}
