use thiserror::Error;

/// Failure kinds surfaced by the collaborator services.
///
/// Date/time parse failures never appear here: the resolver degrades to
/// defaults instead of returning an error.
#[derive(Debug, Error)]
pub enum VpaError {
    #[error("intent service call failed: {0}")]
    IntentService(String),

    #[error("calendar service call failed: {0}")]
    CalendarService(String),

    #[error("calendar authorization has not been granted")]
    AuthorizationMissing,

    #[error("unexpected response from {service}: {detail}")]
    InvalidResponse { service: &'static str, detail: String },
}

impl VpaError {
    /// Message shown to the user when a request fails. Internals stay in
    /// the logs; the user only sees a generic signal, except for the
    /// missing-authorization case which is called out explicitly.
    pub fn user_message(&self) -> &'static str {
        match self {
            VpaError::AuthorizationMissing => "Calendar service unavailable.",
            _ => "Something went wrong.",
        }
    }
}
