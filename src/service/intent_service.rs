use async_trait::async_trait;

use crate::clients::dialogflow::DialogflowClient;
use crate::error::VpaError;
use crate::models::schedule::IntentQueryResult;

/// Seam over the remote intent-detection service; tests plug fakes in
/// here.
#[async_trait]
pub trait IntentDetector: Send + Sync {
    async fn detect_intent(
        &self,
        session_id: &str,
        query_text: &str,
        language_code: &str,
    ) -> Result<IntentQueryResult, VpaError>;
}

pub struct DialogflowService {
    client: DialogflowClient,
}

impl DialogflowService {
    pub fn new(client: DialogflowClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntentDetector for DialogflowService {
    async fn detect_intent(
        &self,
        session_id: &str,
        query_text: &str,
        language_code: &str,
    ) -> Result<IntentQueryResult, VpaError> {
        self.client
            .detect_intent(session_id, query_text, language_code)
            .await
    }
}
