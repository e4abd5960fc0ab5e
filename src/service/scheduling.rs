use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::events::{ChatEvent, EventBus};
use crate::models::message::Message;
use crate::models::schedule::IntentQueryResult;
use crate::models::session::ConversationSession;
use crate::service::calendar_service::CalendarWriter;
use crate::service::datetime::DateTimeResolver;
use crate::service::extraction::{self, Extraction};
use crate::service::intent_service::IntentDetector;

/// Drives one submitted message through the full cycle: detect intent,
/// record the reply, and, when the scheduling intent fires, extract,
/// resolve and write the calendar event.
///
/// Each submission runs as its own spawned task. There is no queue and
/// no cross-request ordering: two quick submissions race and each one
/// updates the conversation independently when it completes. The shared
/// session mutex keeps history appends consistent.
pub struct SchedulingCoordinator {
    session: Arc<Mutex<ConversationSession>>,
    detector: Arc<dyn IntentDetector>,
    calendar: Arc<dyn CalendarWriter>,
    resolver: Arc<DateTimeResolver>,
    events: EventBus,
    language_code: String,
    calendar_id: String,
    cancel: CancellationToken,
}

impl SchedulingCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        session: Arc<Mutex<ConversationSession>>,
        detector: Arc<dyn IntentDetector>,
        calendar: Arc<dyn CalendarWriter>,
        resolver: Arc<DateTimeResolver>,
        events: EventBus,
        language_code: String,
        calendar_id: String,
    ) -> Self {
        Self {
            session,
            detector,
            calendar,
            resolver,
            events,
            language_code,
            calendar_id,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop delivering results for in-flight requests, e.g. when the
    /// hosting surface goes away.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub async fn history(&self) -> Vec<Message> {
        self.session.lock().await.history()
    }

    /// Accept a user message: it lands in history immediately, then one
    /// independent background request runs to completion. The returned
    /// handle is only needed by callers that want to await settlement.
    pub async fn submit(&self, text: &str) -> JoinHandle<()> {
        let session_id = {
            let mut session = self.session.lock().await;
            session.append(Message::from_user(text));
            session.session_id().to_string()
        };

        let session = self.session.clone();
        let detector = self.detector.clone();
        let calendar = self.calendar.clone();
        let resolver = self.resolver.clone();
        let events = self.events.clone();
        let language_code = self.language_code.clone();
        let calendar_id = self.calendar_id.clone();
        let cancel = self.cancel.clone();
        let text = text.to_string();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("request abandoned by shutdown");
                }
                _ = run_request(
                    session,
                    detector,
                    calendar,
                    resolver,
                    events,
                    session_id,
                    text,
                    language_code,
                    calendar_id,
                ) => {}
            }
        })
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_request(
    session: Arc<Mutex<ConversationSession>>,
    detector: Arc<dyn IntentDetector>,
    calendar: Arc<dyn CalendarWriter>,
    resolver: Arc<DateTimeResolver>,
    events: EventBus,
    session_id: String,
    text: String,
    language_code: String,
    calendar_id: String,
) {
    let result = match detector
        .detect_intent(&session_id, &text, &language_code)
        .await
    {
        Ok(result) => result,
        Err(err) => {
            error!(%err, "intent detection failed");
            events
                .emit(ChatEvent::Failure {
                    message: err.user_message().to_string(),
                })
                .await;
            return;
        }
    };

    record_reply(&session, &events, &result).await;

    match extraction::extract(&result) {
        Extraction::Incomplete => {
            debug!(intent = %result.intent_name, "no schedule to create for this turn");
        }
        Extraction::Complete(request) => {
            let schedule = resolver.resolve(&request, Local::now().date_naive());
            match calendar.insert_event(&calendar_id, &schedule).await {
                Ok(()) => {
                    let start_display = resolver.format_start(&schedule);
                    info!(
                        activity = %schedule.activity_label,
                        start = %start_display,
                        "calendar event created"
                    );
                    events
                        .emit(ChatEvent::ScheduleCreated {
                            activity_label: schedule.activity_label.clone(),
                            start_display,
                        })
                        .await;
                }
                Err(err) => {
                    error!(%err, "calendar write failed");
                    events
                        .emit(ChatEvent::Failure {
                            message: err.user_message().to_string(),
                        })
                        .await;
                }
            }
        }
    }
}

/// Append the bot reply and notify the surface. An empty fulfillment
/// text is not a reply; it surfaces as the generic failure signal.
async fn record_reply(
    session: &Arc<Mutex<ConversationSession>>,
    events: &EventBus,
    result: &IntentQueryResult,
) {
    if result.fulfillment_text.is_empty() {
        events
            .emit(ChatEvent::Failure {
                message: "Something went wrong.".to_string(),
            })
            .await;
        return;
    }
    {
        let mut session = session.lock().await;
        session.append(Message::from_bot(result.fulfillment_text.clone()));
    }
    events
        .emit(ChatEvent::BotReply {
            text: result.fulfillment_text.clone(),
        })
        .await;
}
