use std::collections::HashMap;

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// What the intent service produced for one utterance. Transient; built
/// per request and handed straight to the extractor.
#[derive(Debug, Clone)]
pub struct IntentQueryResult {
    pub intent_name: String,
    pub fulfillment_text: String,
    pub parameters: HashMap<String, String>,
}

impl IntentQueryResult {
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .get(key)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Raw scheduling parameters lifted out of an intent result, before any
/// date/time resolution. The label is guaranteed non-empty by the
/// extractor; date and time stay optional and get defaults downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub raw_date: Option<String>,
    pub raw_time: Option<String>,
    pub activity_label: String,
}

/// A concrete calendar event. The end is always start + 1 hour; the
/// constructor is the only way to build one, so the invariant holds
/// everywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSchedule {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    pub activity_label: String,
}

impl ResolvedSchedule {
    /// Fixed event length regardless of input.
    pub fn event_duration() -> Duration {
        Duration::hours(1)
    }

    pub fn new(start: DateTime<FixedOffset>, activity_label: String) -> Self {
        Self {
            start,
            end: start + Self::event_duration(),
            activity_label,
        }
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Epoch milliseconds, the form the calendar write consumes.
    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn resolved_schedule_spans_exactly_one_hour() {
        let start = FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 8, 23, 9, 0, 0)
            .unwrap();
        let schedule = ResolvedSchedule::new(start, "rapat".to_string());
        assert_eq!(schedule.end() - schedule.start(), Duration::hours(1));
        assert_eq!(schedule.end_millis() - schedule.start_millis(), 3_600_000);
    }

    #[test]
    fn parameter_lookup_filters_empty_values() {
        let mut parameters = HashMap::new();
        parameters.insert("date".to_string(), "15-12".to_string());
        parameters.insert("time".to_string(), String::new());
        let result = IntentQueryResult {
            intent_name: "pembuatan_jadwal".to_string(),
            fulfillment_text: "ok".to_string(),
            parameters,
        };
        assert_eq!(result.parameter("date"), Some("15-12"));
        assert_eq!(result.parameter("time"), None);
        assert_eq!(result.parameter("activity_type"), None);
    }
}
