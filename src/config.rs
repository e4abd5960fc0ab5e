use std::collections::HashMap;
use std::env;
use std::fs;

use chrono_tz::Tz;
use tracing::warn;

pub const DEFAULT_LANGUAGE_CODE: &str = "id-ID";
pub const DEFAULT_MONTH_LOCALE: &str = "id";
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Key=value settings from an optional config file, with environment
/// variables as the per-key fallback.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    /// Load from the file named by `CONFIG_FILE`, if any. A missing or
    /// malformed file degrades to env-only lookups.
    pub fn load() -> Self {
        match env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(&path).unwrap_or_else(|err| {
                warn!(%path, %err, "ignoring unreadable config file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let Some((key, value)) = line.split_once('=') else {
                return Err(format!("invalid config line {}: {}", idx + 1, line));
            };
            values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
        Ok(Self { values })
    }

    /// File value first, then the environment.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned().or_else(|| env::var(key).ok())
    }

    pub fn language_code(&self) -> String {
        self.lookup("LANGUAGE_CODE")
            .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string())
    }

    pub fn month_locale(&self) -> String {
        self.lookup("MONTH_LOCALE")
            .unwrap_or_else(|| DEFAULT_MONTH_LOCALE.to_string())
    }

    pub fn calendar_id(&self) -> String {
        self.lookup("CALENDAR_ID")
            .unwrap_or_else(|| DEFAULT_CALENDAR_ID.to_string())
    }

    /// IANA zone for resolved events; `None` means the system zone.
    pub fn time_zone(&self) -> Option<Tz> {
        let name = self.lookup("TIMEZONE")?;
        match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                warn!(%name, "unknown TIMEZONE, using the system zone");
                None
            }
        }
    }

    pub fn dialogflow_project_id(&self) -> Option<String> {
        self.lookup("DIALOGFLOW_PROJECT_ID")
    }

    pub fn dialogflow_access_token(&self) -> Option<String> {
        self.lookup("DIALOGFLOW_ACCESS_TOKEN")
    }

    /// Optional on purpose: without it the calendar writer reports
    /// "service unavailable" instead of failing startup.
    pub fn calendar_access_token(&self) -> Option<String> {
        self.lookup("CALENDAR_ACCESS_TOKEN")
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value)
}
