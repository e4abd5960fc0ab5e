use tracing::debug;

use crate::models::schedule::{IntentQueryResult, ScheduleRequest};

/// Intent name that triggers calendar scheduling. Case-sensitive exact
/// match against the detected intent's display name.
pub const SCHEDULING_INTENT: &str = "pembuatan_jadwal";

const PARAM_DATE: &str = "date";
const PARAM_TIME: &str = "time";
const PARAM_ACTIVITY: &str = "activity_type";

/// Outcome of pulling scheduling parameters out of an intent result.
///
/// `Incomplete` is a normal outcome, not an error: it means "do not
/// attempt to schedule" and the caller moves on with only a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Complete(ScheduleRequest),
    Incomplete,
}

pub fn extract(result: &IntentQueryResult) -> Extraction {
    if result.intent_name != SCHEDULING_INTENT {
        return Extraction::Incomplete;
    }

    let date = result.parameter(PARAM_DATE);
    let time = result.parameter(PARAM_TIME);
    let activity = result.parameter(PARAM_ACTIVITY);
    debug!(?date, ?time, ?activity, "raw scheduling parameters");

    let (Some(date), Some(time), Some(activity)) = (date, time, activity) else {
        debug!(intent = %result.intent_name, "incomplete parameters, skipping scheduling");
        return Extraction::Incomplete;
    };

    Extraction::Complete(ScheduleRequest {
        raw_date: Some(date.to_string()),
        raw_time: Some(time.to_string()),
        activity_label: activity.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn result_with(params: &[(&str, &str)], intent: &str) -> IntentQueryResult {
        IntentQueryResult {
            intent_name: intent.to_string(),
            fulfillment_text: "Baik, jadwal dibuat.".to_string(),
            parameters: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn extracts_complete_request() {
        let result = result_with(
            &[("date", "15-12"), ("time", "10:00"), ("activity_type", "rapat")],
            SCHEDULING_INTENT,
        );
        assert_eq!(
            extract(&result),
            Extraction::Complete(ScheduleRequest {
                raw_date: Some("15-12".to_string()),
                raw_time: Some("10:00".to_string()),
                activity_label: "rapat".to_string(),
            })
        );
    }

    #[test]
    fn missing_any_required_key_is_incomplete() {
        let cases: [&[(&str, &str)]; 3] = [
            &[("time", "10:00"), ("activity_type", "rapat")],
            &[("date", "15-12"), ("activity_type", "rapat")],
            &[("date", "15-12"), ("time", "10:00")],
        ];
        for params in cases {
            let result = result_with(params, SCHEDULING_INTENT);
            assert_eq!(extract(&result), Extraction::Incomplete, "params: {params:?}");
        }
    }

    #[test]
    fn empty_parameter_values_are_incomplete() {
        let result = result_with(
            &[("date", "15-12"), ("time", ""), ("activity_type", "rapat")],
            SCHEDULING_INTENT,
        );
        assert_eq!(extract(&result), Extraction::Incomplete);
    }

    #[test]
    fn non_scheduling_intent_is_incomplete() {
        let result = result_with(
            &[("date", "15-12"), ("time", "10:00"), ("activity_type", "rapat")],
            "smalltalk",
        );
        assert_eq!(extract(&result), Extraction::Incomplete);
    }

    #[test]
    fn intent_match_is_case_sensitive() {
        let result = result_with(
            &[("date", "15-12"), ("time", "10:00"), ("activity_type", "rapat")],
            "Pembuatan_Jadwal",
        );
        assert_eq!(extract(&result), Extraction::Incomplete);
    }
}
