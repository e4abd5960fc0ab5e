use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::clients::calendar::CalendarClient;
use crate::clients::dialogflow::DialogflowClient;
use crate::config::AppConfig;
use crate::events::{ChatEvent, EventBus};
use crate::models::session::ConversationSession;
use crate::service::calendar_service::GoogleCalendarService;
use crate::service::datetime::{DateTimeResolver, MonthTable, INDONESIAN_MONTHS};
use crate::service::intent_service::DialogflowService;
use crate::service::scheduling::SchedulingCoordinator;

const EVENT_BUFFER: usize = 16;

/// Wire the production collaborators into a coordinator plus the event
/// stream the hosting surface renders from.
pub fn build(
    config: &AppConfig,
) -> Result<(SchedulingCoordinator, mpsc::Receiver<ChatEvent>), String> {
    let project_id = config
        .dialogflow_project_id()
        .ok_or("DIALOGFLOW_PROJECT_ID must be set")?;
    let intent_token = config
        .dialogflow_access_token()
        .ok_or("DIALOGFLOW_ACCESS_TOKEN must be set")?;

    let mut dialogflow = DialogflowClient::new(project_id, intent_token);
    if let Some(base_url) = config.lookup("DIALOGFLOW_BASE_URL") {
        dialogflow = dialogflow.with_base_url(base_url);
    }

    let calendar = match config.calendar_access_token() {
        Some(token) => {
            let mut client = CalendarClient::new(token);
            if let Some(base_url) = config.lookup("CALENDAR_BASE_URL") {
                client = client.with_base_url(base_url);
            }
            GoogleCalendarService::from_client(client)
        }
        None => GoogleCalendarService::new(None),
    };

    let months = MonthTable::for_locale(&config.month_locale()).unwrap_or(&INDONESIAN_MONTHS);
    let resolver = DateTimeResolver::new(months, config.time_zone());

    let (events, rx) = EventBus::new(EVENT_BUFFER);
    let coordinator = SchedulingCoordinator::new(
        Arc::new(Mutex::new(ConversationSession::new())),
        Arc::new(DialogflowService::new(dialogflow)),
        Arc::new(calendar),
        Arc::new(resolver),
        events,
        config.language_code(),
        config.calendar_id(),
    );
    Ok((coordinator, rx))
}
