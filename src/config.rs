use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::services::engagement_service::{
    EngagementWindow, WindowUpperBound, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS,
};

pub const DEFAULT_ROSTER_PATH: &str = "users.xlsx";
pub const DEFAULT_ROSTER_SHEET: &str = "date";
pub const DEFAULT_ACTIVITY_PATH: &str = "df_all.csv";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub roster_path: PathBuf,
    pub roster_sheet: String,
    pub activity_path: PathBuf,
    pub engagement_window: EngagementWindow,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from(DEFAULT_ROSTER_PATH),
            roster_sheet: DEFAULT_ROSTER_SHEET.to_string(),
            activity_path: PathBuf::from(DEFAULT_ACTIVITY_PATH),
            engagement_window: EngagementWindow::default(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env` file.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let window_days = match non_empty("ENGAGEMENT_WINDOW_DAYS") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if (0..=MAX_WINDOW_DAYS).contains(&days) => days,
                _ => {
                    warn!(value = %raw, "invalid ENGAGEMENT_WINDOW_DAYS, using default");
                    DEFAULT_WINDOW_DAYS
                }
            },
            None => DEFAULT_WINDOW_DAYS,
        };

        let upper_bound = match non_empty("ENGAGEMENT_WINDOW_BOUNDED") {
            Some(raw) => match parse_flag(&raw) {
                Some(true) => WindowUpperBound::Now,
                Some(false) => WindowUpperBound::Open,
                None => {
                    warn!(value = %raw, "invalid ENGAGEMENT_WINDOW_BOUNDED, using default");
                    WindowUpperBound::Open
                }
            },
            None => WindowUpperBound::Open,
        };

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid PORT, using default");
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            roster_path: non_empty("ROSTER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.roster_path),
            roster_sheet: non_empty("ROSTER_SHEET").unwrap_or(defaults.roster_sheet),
            activity_path: non_empty("ACTIVITY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.activity_path),
            engagement_window: EngagementWindow::new(window_days, upper_bound),
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.roster_path, PathBuf::from("users.xlsx"));
        assert_eq!(config.roster_sheet, "date");
        assert_eq!(config.activity_path, PathBuf::from("df_all.csv"));
        assert_eq!(config.engagement_window, EngagementWindow::default());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ROSTER_PATH", "/data/roster.csv"),
            ("ROSTER_SHEET", "orgs"),
            ("ACTIVITY_PATH", "/data/events.csv"),
            ("ENGAGEMENT_WINDOW_DAYS", "7"),
            ("ENGAGEMENT_WINDOW_BOUNDED", "true"),
            ("PORT", "8080"),
        ]));
        assert_eq!(config.roster_path, PathBuf::from("/data/roster.csv"));
        assert_eq!(config.roster_sheet, "orgs");
        assert_eq!(config.activity_path, PathBuf::from("/data/events.csv"));
        assert_eq!(
            config.engagement_window,
            EngagementWindow::new(7, WindowUpperBound::Now)
        );
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn window_days_outside_range_fall_back() {
        for raw in ["36501", "9223372036854775807", "-1"] {
            let config =
                AppConfig::from_lookup(lookup_from(&[("ENGAGEMENT_WINDOW_DAYS", raw)]));
            assert_eq!(config.engagement_window.days, DEFAULT_WINDOW_DAYS, "{raw}");
        }
        let config =
            AppConfig::from_lookup(lookup_from(&[("ENGAGEMENT_WINDOW_DAYS", "36500")]));
        assert_eq!(config.engagement_window.days, MAX_WINDOW_DAYS);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ENGAGEMENT_WINDOW_DAYS", "two weeks"),
            ("ENGAGEMENT_WINDOW_BOUNDED", "maybe"),
            ("PORT", "http"),
            ("HOST", "  "),
        ]));
        assert_eq!(config.engagement_window, EngagementWindow::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
    }
}
