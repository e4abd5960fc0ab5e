use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat bubble. Immutable once appended to a session.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub from_bot: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn from_user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_bot: false,
            created_at: Utc::now(),
        }
    }

    pub fn from_bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_bot: true,
            created_at: Utc::now(),
        }
    }
}
