use uuid::Uuid;

use crate::models::message::Message;

/// One logical dialogue with the intent service.
///
/// The session id is generated once and sent with every detectIntent
/// request so the remote service can keep dialogue context across turns.
/// Messages are append-only; nothing is persisted across runs.
#[derive(Debug)]
pub struct ConversationSession {
    session_id: String,
    messages: Vec<Message>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Snapshot for renderers; the live list stays owned by the session.
    pub fn history(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_stable_for_the_session_lifetime() {
        let session = ConversationSession::new();
        let first = session.session_id().to_string();
        assert_eq!(session.session_id(), first);
        assert!(!first.is_empty());
    }

    #[test]
    fn distinct_sessions_get_distinct_ids() {
        let a = ConversationSession::new();
        let b = ConversationSession::new();
        assert_ne!(a.session_id(), b.session_id());
    }

    #[test]
    fn history_is_a_snapshot() {
        let mut session = ConversationSession::new();
        session.append(Message::from_user("hi"));
        let snapshot = session.history();
        session.append(Message::from_bot("hello"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut session = ConversationSession::new();
        session.append(Message::from_user("one"));
        session.append(Message::from_bot("two"));
        session.append(Message::from_user("three"));
        let history = session.history();
        let texts: Vec<&str> = history.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }
}
