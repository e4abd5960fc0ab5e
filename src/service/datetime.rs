use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};
use chrono_tz::Tz;
use tracing::warn;

use crate::models::schedule::{ResolvedSchedule, ScheduleRequest};

/// Month names for the localized "day monthname" date pattern, keyed by
/// locale so the core logic stays language-agnostic.
#[derive(Debug)]
pub struct MonthTable {
    pub locale: &'static str,
    names: [&'static str; 12],
}

pub static INDONESIAN_MONTHS: MonthTable = MonthTable {
    locale: "id",
    names: [
        "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
        "Oktober", "November", "Desember",
    ],
};

pub static ENGLISH_MONTHS: MonthTable = MonthTable {
    locale: "en",
    names: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
};

impl MonthTable {
    pub fn for_locale(locale: &str) -> Option<&'static MonthTable> {
        [&INDONESIAN_MONTHS, &ENGLISH_MONTHS]
            .into_iter()
            .find(|table| table.locale == locale)
    }

    fn month_number(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .map(|idx| idx as u32 + 1)
    }

    fn name_of(&self, month: u32) -> &'static str {
        self.names
            .get(month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?")
    }
}

/// Time zone the resolved event instants are anchored in.
#[derive(Debug, Clone, Copy)]
enum EventZone {
    Named(Tz),
    System,
}

/// Turns the raw date/time strings from an intent result into a concrete
/// one-hour event.
///
/// Parsing never fails outward: malformed input degrades to today / 09:00
/// with a diagnostic log, so a garbage utterance still yields a usable
/// schedule.
#[derive(Debug)]
pub struct DateTimeResolver {
    months: &'static MonthTable,
    zone: EventZone,
}

impl DateTimeResolver {
    pub fn new(months: &'static MonthTable, zone: Option<Tz>) -> Self {
        Self {
            months,
            zone: match zone {
                Some(tz) => EventZone::Named(tz),
                None => EventZone::System,
            },
        }
    }

    /// Resolve a raw date string against a reference date.
    ///
    /// Accepted shapes, in precedence order: ISO-8601 offset datetime
    /// (contains `T`), `DD-MM`, then `"<day> <monthname>"` in the
    /// configured locale. The year is always replaced with the reference
    /// year, including for ISO input that carries an explicit one.
    pub fn resolve_date(&self, raw: Option<&str>, today: NaiveDate) -> NaiveDate {
        let Some(raw) = raw else {
            return today;
        };
        match self.parse_date(raw, today.year()) {
            Some(date) => date,
            None => {
                warn!(raw, "unparseable date, falling back to today");
                today
            }
        }
    }

    fn parse_date(&self, raw: &str, year: i32) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.contains('T') {
            let parsed = DateTime::parse_from_rfc3339(raw).ok()?;
            // The parsed year is discarded on purpose; scheduling into
            // other years by voice is unsupported.
            return parsed.date_naive().with_year(year);
        }
        if raw.contains('-') {
            let (day, month) = raw.split_once('-')?;
            let day: u32 = day.trim().parse().ok()?;
            let month: u32 = month.trim().parse().ok()?;
            return NaiveDate::from_ymd_opt(year, month, day);
        }
        let (day, month_name) = raw.split_once(' ')?;
        let day: u32 = day.trim().parse().ok()?;
        let month = self.months.month_number(month_name.trim())?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Resolve a raw `HH:mm` string; absent or malformed input yields
    /// the 09:00 default.
    pub fn resolve_time(&self, raw: Option<&str>) -> NaiveTime {
        let Some(raw) = raw else {
            return default_time();
        };
        match NaiveTime::parse_from_str(raw.trim(), "%H:%M") {
            Ok(time) => time,
            Err(err) => {
                warn!(raw, %err, "unparseable time, falling back to 09:00");
                default_time()
            }
        }
    }

    /// Full resolution: date + time + zone, into a one-hour event.
    pub fn resolve(&self, request: &ScheduleRequest, today: NaiveDate) -> ResolvedSchedule {
        let date = self.resolve_date(request.raw_date.as_deref(), today);
        let time = self.resolve_time(request.raw_time.as_deref());
        let start = self.localize(date.and_time(time));
        ResolvedSchedule::new(start, request.activity_label.clone())
    }

    fn localize(&self, local: NaiveDateTime) -> DateTime<FixedOffset> {
        match self.zone {
            EventZone::Named(tz) => tz
                .from_local_datetime(&local)
                .earliest()
                .unwrap_or_else(|| tz.from_utc_datetime(&local))
                .fixed_offset(),
            EventZone::System => Local
                .from_local_datetime(&local)
                .earliest()
                .unwrap_or_else(|| Local.from_utc_datetime(&local))
                .fixed_offset(),
        }
    }

    /// `"d MMMM yyyy HH:mm"` in the configured locale, for user-facing
    /// confirmations.
    pub fn format_start(&self, schedule: &ResolvedSchedule) -> String {
        let start = schedule.start();
        format!(
            "{} {} {} {:02}:{:02}",
            start.day(),
            self.months.name_of(start.month()),
            start.year(),
            start.hour(),
            start.minute()
        )
    }
}

fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn resolver() -> DateTimeResolver {
        DateTimeResolver::new(&INDONESIAN_MONTHS, Some(chrono_tz::Asia::Jakarta))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    #[test]
    fn day_month_date_gets_reference_year() {
        let date = resolver().resolve_date(Some("15-12"), today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 12, 15).unwrap());
    }

    #[test]
    fn iso_datetime_year_is_replaced_with_current_year() {
        // Explicit years in ISO input are discarded, preserved behavior.
        let date = resolver().resolve_date(Some("2024-12-15T10:00:00+07:00"), today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 12, 15).unwrap());
    }

    #[test]
    fn localized_month_name_parses() {
        let date = resolver().resolve_date(Some("15 Desember"), today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 12, 15).unwrap());
    }

    #[test]
    fn month_name_match_is_case_insensitive() {
        let date = resolver().resolve_date(Some("3 mei"), today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 5, 3).unwrap());
    }

    #[test]
    fn english_table_parses_its_own_month_names() {
        let resolver = DateTimeResolver::new(&ENGLISH_MONTHS, Some(chrono_tz::Asia::Jakarta));
        let date = resolver.resolve_date(Some("15 December"), today());
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 12, 15).unwrap());
    }

    #[test]
    fn absent_date_defaults_to_today() {
        assert_eq!(resolver().resolve_date(None, today()), today());
    }

    #[test]
    fn garbage_dates_default_to_today() {
        let resolver = resolver();
        for raw in ["", "besok", "99-99", "15 Smarch", "15_12", "nonsense with spaces"] {
            assert_eq!(resolver.resolve_date(Some(raw), today()), today(), "raw: {raw:?}");
        }
    }

    #[test]
    fn absent_time_defaults_to_nine() {
        assert_eq!(
            resolver().resolve_time(None),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn garbage_times_default_to_nine() {
        let resolver = resolver();
        for raw in ["", "siang", "25:99", "9 o'clock", "12.30"] {
            assert_eq!(
                resolver.resolve_time(Some(raw)),
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                "raw: {raw:?}"
            );
        }
    }

    #[test]
    fn valid_time_is_kept() {
        assert_eq!(
            resolver().resolve_time(Some("14:30")),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
    }

    #[test]
    fn resolution_spans_one_hour_in_the_configured_zone() {
        let request = ScheduleRequest {
            raw_date: Some("15-12".to_string()),
            raw_time: Some("10:00".to_string()),
            activity_label: "rapat tim".to_string(),
        };
        let schedule = resolver().resolve(&request, today());
        assert_eq!(schedule.end() - schedule.start(), Duration::hours(1));
        assert_eq!(schedule.start().offset().local_minus_utc(), 7 * 3600);
        assert_eq!(schedule.start().hour(), 10);
        assert_eq!(schedule.activity_label, "rapat tim");
    }

    #[test]
    fn fully_defaulted_request_still_resolves() {
        let request = ScheduleRequest {
            raw_date: None,
            raw_time: None,
            activity_label: "olahraga".to_string(),
        };
        let schedule = resolver().resolve(&request, today());
        assert_eq!(schedule.start().date_naive(), today());
        assert_eq!(schedule.start().time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn start_formats_with_locale_month_names() {
        let request = ScheduleRequest {
            raw_date: Some("15 Desember".to_string()),
            raw_time: Some("10:00".to_string()),
            activity_label: "rapat".to_string(),
        };
        let resolver = resolver();
        let schedule = resolver.resolve(&request, today());
        assert_eq!(resolver.format_start(&schedule), "15 Desember 2026 10:00");
    }
}
