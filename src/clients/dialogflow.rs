use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::VpaError;
use crate::models::schedule::IntentQueryResult;

const DEFAULT_BASE_URL: &str = "https://dialogflow.googleapis.com";

/// REST client for the Dialogflow v2 `detectIntent` endpoint.
pub struct DialogflowClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest<'a> {
    query_input: QueryInput<'a>,
}

#[derive(Debug, Serialize)]
struct QueryInput<'a> {
    text: TextInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextInput<'a> {
    text: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    query_result: Option<QueryResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct QueryResult {
    intent: Option<IntentRef>,
    fulfillment_text: String,
    parameters: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct IntentRef {
    display_name: String,
}

impl DialogflowClient {
    pub fn new(project_id: String, access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id,
            access_token,
        }
    }

    /// Point the client at a different host, for local stubs.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn detect_intent(
        &self,
        session_id: &str,
        query_text: &str,
        language_code: &str,
    ) -> Result<IntentQueryResult, VpaError> {
        let url = format!(
            "{}/v2/projects/{}/agent/sessions/{}:detectIntent",
            self.base_url, self.project_id, session_id
        );
        let request = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput {
                    text: query_text,
                    language_code,
                },
            },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|err| VpaError::IntentService(err.to_string()))?;

        let status = response.status();
        // Read the body once so error paths can show it.
        let body = response
            .text()
            .await
            .map_err(|err| VpaError::IntentService(err.to_string()))?;

        if !status.is_success() {
            error!(%status, %body, "detectIntent returned an error status");
            return Err(VpaError::IntentService(format!(
                "request failed with status {status}"
            )));
        }

        let parsed: DetectIntentResponse =
            serde_json::from_str(&body).map_err(|err| VpaError::InvalidResponse {
                service: "dialogflow",
                detail: format!("{err}; raw body: {body}"),
            })?;

        let query_result = parsed.query_result.unwrap_or_default();
        Ok(IntentQueryResult {
            intent_name: query_result.intent.unwrap_or_default().display_name,
            fulfillment_text: query_result.fulfillment_text,
            parameters: lift_string_parameters(query_result.parameters),
        })
    }
}

/// Dialogflow parameters arrive as a loose JSON object; only string
/// values are meaningful to the extractor, the rest are dropped.
fn lift_string_parameters(parameters: HashMap<String, Value>) -> HashMap<String, String> {
    let mut lifted = HashMap::new();
    for (key, value) in parameters {
        match value {
            Value::String(s) => {
                lifted.insert(key, s);
            }
            other => debug!(%key, ?other, "skipping non-string intent parameter"),
        }
    }
    lifted
}
