use tokio::sync::mpsc;

/// Notifications marshaled back from in-flight request tasks to whatever
/// surface is rendering the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The bot replied; the text has already been appended to history.
    BotReply { text: String },
    /// A calendar event was created from this turn.
    ScheduleCreated {
        activity_label: String,
        start_display: String,
    },
    /// Generic user-visible failure signal.
    Failure { message: String },
}

#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::Sender<ChatEvent>,
}

impl EventBus {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<ChatEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    /// Delivery into a torn-down consumer is a deliberate no-op; a
    /// response arriving after the surface is gone must not fault.
    pub async fn emit(&self, event: ChatEvent) {
        let _ = self.tx.send(event).await;
    }
}
