use async_trait::async_trait;
use tracing::warn;

use crate::clients::calendar::CalendarClient;
use crate::error::VpaError;
use crate::models::schedule::ResolvedSchedule;

pub const PRIMARY_CALENDAR: &str = "primary";

/// Seam over the calendar-write collaborator.
#[async_trait]
pub trait CalendarWriter: Send + Sync {
    async fn insert_event(
        &self,
        calendar_id: &str,
        schedule: &ResolvedSchedule,
    ) -> Result<(), VpaError>;
}

/// Production writer. Built without an access token it degrades to
/// "service unavailable" instead of attempting the call; token refresh
/// and consent flows live outside this crate.
pub struct GoogleCalendarService {
    client: Option<CalendarClient>,
}

impl GoogleCalendarService {
    pub fn new(access_token: Option<String>) -> Self {
        if access_token.is_none() {
            warn!("no calendar access token configured, event writes will be unavailable");
        }
        Self {
            client: access_token.map(CalendarClient::new),
        }
    }

    pub fn from_client(client: CalendarClient) -> Self {
        Self {
            client: Some(client),
        }
    }
}

#[async_trait]
impl CalendarWriter for GoogleCalendarService {
    async fn insert_event(
        &self,
        calendar_id: &str,
        schedule: &ResolvedSchedule,
    ) -> Result<(), VpaError> {
        let Some(client) = &self.client else {
            return Err(VpaError::AuthorizationMissing);
        };
        client.insert_event(calendar_id, schedule).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[tokio::test]
    async fn missing_token_yields_authorization_error() {
        let writer = GoogleCalendarService::new(None);
        let start = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 8, 23, 9, 0, 0)
            .unwrap();
        let schedule = ResolvedSchedule::new(start, "rapat".to_string());
        let err = writer
            .insert_event(PRIMARY_CALENDAR, &schedule)
            .await
            .unwrap_err();
        assert!(matches!(err, VpaError::AuthorizationMissing));
    }
}
