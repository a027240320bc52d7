// Application configuration model
// Serialized to config.toml by the settings service

use serde::{Deserialize, Serialize};

use crate::utils::time::parse_clock_time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// Bearer token. Usually supplied through the environment instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// Retries for idempotent reads only.
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            token: None,
            timeout_secs: 20,
            max_retries: 2,
            retry_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Schedule opened on startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_schedule_id: Option<String>,
    /// Row spacing used when time rows are derived from part bounds.
    pub slot_interval_minutes: u32,
    /// Explicit per-part time rows; overrides derivation when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slots: Option<Vec<Vec<String>>>,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            default_schedule_id: None,
            slot_interval_minutes: 10,
            time_slots: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub schedule: ScheduleSettings,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err("api.base_url must start with http:// or https://".to_string());
        }
        if self.api.timeout_secs == 0 {
            return Err("api.timeout_secs must be greater than 0".to_string());
        }
        if self.schedule.slot_interval_minutes == 0 || self.schedule.slot_interval_minutes > 120 {
            return Err("schedule.slot_interval_minutes must be between 1 and 120".to_string());
        }

        if let Some(time_slots) = &self.schedule.time_slots {
            for (index, rows) in time_slots.iter().enumerate() {
                if let Some(bad) = rows.iter().find(|row| parse_clock_time(row).is_none()) {
                    return Err(format!(
                        "schedule.time_slots part {} has an invalid time '{}'",
                        index + 1,
                        bad
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = AppConfig::default();
        config.schedule.slot_interval_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unreadable_time_rows() {
        let mut config = AppConfig::default();
        config.schedule.time_slots = Some(vec![vec!["06:00".to_string(), "6 o'clock".to_string()]]);
        let err = config.validate().unwrap_err();
        assert!(err.contains("part 1"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://ops.example.com/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://ops.example.com/api");
        assert_eq!(config.api.timeout_secs, 20);
        assert_eq!(config.schedule.slot_interval_minutes, 10);
    }
}
