use anyhow::{Context, Result};

use super::ConsoleApp;
use crate::models::settings::AppConfig;
use crate::services::schedule_api::{HttpScheduleApi, ScheduleApi};
use crate::services::settings::ConfigService;

impl ConsoleApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config_service = ConfigService::from_default_location();
        let (config, config_error) = load_config_or_default(&config_service);
        log::info!(
            "Using schedule API at {} (config {})",
            config.api.base_url,
            config_service.path().display()
        );

        let api = match build_api(&config) {
            Ok(api) => Some(api),
            Err(err) => {
                log::error!("Schedule API unavailable: {:#}", err);
                None
            }
        };
        let api_missing = api.is_none();

        let mut app = Self::with_api(config, api);
        if let Some(message) = config_error {
            app.toast_manager.warning(message);
        }
        if api_missing {
            app.toast_manager.error("Schedule service could not be started");
        } else if app.state.input.requested_id().is_some() {
            app.load_schedule();
        }
        app
    }
}

fn build_api(config: &AppConfig) -> Result<Box<dyn ScheduleApi>> {
    let api = HttpScheduleApi::new(&config.api).context("Failed to create schedule client")?;
    Ok(Box::new(api))
}

fn load_config_or_default(service: &ConfigService) -> (AppConfig, Option<String>) {
    match service.load() {
        Ok(config) => (config, None),
        Err(e) => {
            log::warn!("Failed to load configuration: {:#}, using defaults", e);
            (
                AppConfig::default(),
                Some("Configuration could not be read; using defaults".to_string()),
            )
        }
    }
}
