//! Planner configuration loaded from environment variables.

use std::env;

use chrono::NaiveTime;
use chrono_tz::Tz;

use autopostr_core::domain::{PlannerSettings, parse_time};

use crate::database::DatabaseConfig;

/// Planner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub settings: PlannerSettings,
    /// `None` when `DATABASE_URL` is unset; the in-memory store is used then.
    pub database: Option<DatabaseConfig>,
}

impl PlannerConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`. Unset or unusable values keep
    /// their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = PlannerSettings::default();

        let default_platforms = lookup("AUTOPOSTR_DEFAULT_PLATFORMS")
            .map(|raw| split_list(&raw).map(str::to_lowercase).collect::<Vec<_>>())
            .filter(|platforms| !platforms.is_empty())
            .unwrap_or(defaults.default_platforms);

        let default_timezone = match lookup("AUTOPOSTR_TIMEZONE") {
            Some(raw) => match raw.trim().parse::<Tz>() {
                Ok(tz) => tz.name().to_string(),
                Err(_) => {
                    tracing::warn!(timezone = %raw, "Unknown timezone, using default");
                    defaults.default_timezone
                }
            },
            None => defaults.default_timezone,
        };

        let posting_times = lookup("AUTOPOSTR_POSTING_TIMES")
            .map(|raw| parse_posting_times(&raw))
            .filter(|times| !times.is_empty())
            .unwrap_or(defaults.posting_times);

        let placeholder_caption = lookup("AUTOPOSTR_PLACEHOLDER_CAPTION")
            .filter(|caption| !caption.trim().is_empty())
            .unwrap_or(defaults.placeholder_caption);

        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DatabaseConfig::DEFAULT_MAX_CONNECTIONS),
            min_connections: lookup("DB_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DatabaseConfig::DEFAULT_MIN_CONNECTIONS),
        });

        Self {
            settings: PlannerSettings {
                default_platforms,
                default_timezone,
                posting_times,
                placeholder_caption,
            },
            database,
        }
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn parse_posting_times(raw: &str) -> Vec<NaiveTime> {
    split_list(raw)
        .filter_map(|item| {
            let time = parse_time(item);
            if time.is_none() {
                tracing::warn!(value = item, "Ignoring invalid posting time");
            }
            time
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> PlannerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlannerConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.settings, PlannerSettings::default());
        assert!(config.database.is_none());
    }

    #[test]
    fn test_reads_planner_settings() {
        let config = config_from(&[
            ("AUTOPOSTR_DEFAULT_PLATFORMS", "Instagram, LinkedIn,,"),
            ("AUTOPOSTR_TIMEZONE", "America/New_York"),
            ("AUTOPOSTR_POSTING_TIMES", "08:30, nope, 17:00"),
            ("AUTOPOSTR_PLACEHOLDER_CAPTION", "TBD"),
        ]);

        assert_eq!(config.settings.default_platforms, vec!["instagram", "linkedin"]);
        assert_eq!(config.settings.default_timezone, "America/New_York");
        assert_eq!(
            config.settings.posting_times,
            vec![
                NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ]
        );
        assert_eq!(config.settings.placeholder_caption, "TBD");
    }

    #[test]
    fn test_unknown_timezone_falls_back() {
        let config = config_from(&[("AUTOPOSTR_TIMEZONE", "Mars/Olympus_Mons")]);
        assert_eq!(config.settings.default_timezone, "UTC");
    }

    #[test]
    fn test_unusable_posting_times_keep_defaults() {
        let config = config_from(&[("AUTOPOSTR_POSTING_TIMES", "noon, later")]);
        assert_eq!(config.settings.posting_times, PlannerSettings::default().posting_times);
    }

    #[test]
    fn test_database_config_from_url() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/autopostr"),
            ("DB_MAX_CONNECTIONS", "50"),
        ]);
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/autopostr");
        assert_eq!(database.max_connections, 50);
        assert_eq!(database.min_connections, DatabaseConfig::DEFAULT_MIN_CONNECTIONS);
    }
}
