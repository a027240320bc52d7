use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;

use super::{ApiError, AssignRequest, RemoveRequest, ScheduleApi};
use crate::models::schedule::wire::ScheduleDetailDto;
use crate::models::schedule::{ScheduleId, ScheduleSnapshot};
use crate::models::settings::ApiSettings;

const MAX_RESPONSE_BYTES: usize = 5 * 1024 * 1024;

/// Error body shape. The backend is not consistent about the message key.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_parts(self, fallback: String) -> (Option<String>, String) {
        let message = self
            .message
            .or(self.detail)
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(fallback);
        (self.code, message)
    }
}

pub struct HttpScheduleApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl HttpScheduleApi {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build schedule API HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone().filter(|token| !token.trim().is_empty()),
            max_retries: settings.max_retries,
            retry_delay_ms: settings.retry_delay_ms,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn fetch_once(&self, schedule_id: &ScheduleId) -> Result<ScheduleSnapshot, ApiError> {
        let url = self.url(&format!("work-schedules/{}/", schedule_id));
        let response = self
            .authorize(self.client.get(&url))
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let body = Self::read_success_body(response)?;
        let dto: ScheduleDetailDto = serde_json::from_slice(&body)
            .map_err(|err| ApiError::Decode(format!("schedule detail: {}", err)))?;

        dto.into_snapshot(schedule_id)
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    fn post_json<T: serde::Serialize>(&self, path: &str, body: &T) -> Result<(), ApiError> {
        let response = self
            .authorize(self.client.post(self.url(path)))
            .json(body)
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Self::read_success_body(response).map(|_| ())
    }

    fn read_success_body(response: Response) -> Result<Vec<u8>, ApiError> {
        let status = response.status();

        if let Some(content_length) = response.content_length() {
            if content_length as usize > MAX_RESPONSE_BYTES {
                return Err(ApiError::Decode(format!(
                    "response too large ({} bytes > {} bytes)",
                    content_length, MAX_RESPONSE_BYTES
                )));
            }
        }

        let bytes = response
            .bytes()
            .map_err(|err| ApiError::Network(format!("failed to read response body: {}", err)))?;

        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(ApiError::Decode(format!(
                "response too large ({} bytes > {} bytes)",
                bytes.len(),
                MAX_RESPONSE_BYTES
            )));
        }

        if status.is_success() {
            return Ok(bytes.to_vec());
        }

        Err(Self::rejection(status.as_u16(), &bytes))
    }

    fn rejection(status: u16, body: &[u8]) -> ApiError {
        let fallback = String::from_utf8_lossy(body).trim().to_string();
        let fallback = if fallback.is_empty() {
            format!("HTTP status {}", status)
        } else {
            fallback
        };

        let (code, message) = serde_json::from_slice::<ErrorBody>(body)
            .map(|parsed| parsed.into_parts(fallback.clone()))
            .unwrap_or((None, fallback));

        ApiError::Rejected {
            status,
            code,
            message,
        }
    }
}

impl ScheduleApi for HttpScheduleApi {
    fn fetch_schedule(&self, schedule_id: &ScheduleId) -> Result<ScheduleSnapshot, ApiError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(schedule_id) {
                Ok(snapshot) => return Ok(snapshot),
                // Only transport failures are worth retrying.
                Err(ApiError::Network(message)) if attempt < self.max_retries => {
                    attempt += 1;
                    log::warn!(
                        "Schedule fetch attempt {} failed for {}: {}",
                        attempt,
                        schedule_id,
                        message
                    );
                    thread::sleep(Duration::from_millis(self.retry_delay_ms));
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn assign_to_slot(&self, request: &AssignRequest) -> Result<(), ApiError> {
        log::info!(
            "Assigning {:?} {:?} to part {} field {} at {}",
            request.kind(),
            request.entity_id(),
            request.part_id,
            request.field_number,
            request.time
        );
        self.post_json("work-schedules/assign/", request)
    }

    fn remove_assignment(&self, request: &RemoveRequest) -> Result<(), ApiError> {
        log::info!(
            "Removing {} assignment from slot {}",
            request.assignment_type.wire_name(),
            request.slot_id
        );
        self.post_json("work-schedules/remove/", request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpScheduleApi {
        HttpScheduleApi::new(&ApiSettings {
            base_url: base_url.to_string(),
            ..ApiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slashes() {
        let api = api("https://ops.example.com/api/");
        assert_eq!(
            api.url("/work-schedules/assign/"),
            "https://ops.example.com/api/work-schedules/assign/"
        );
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let api = HttpScheduleApi::new(&ApiSettings {
            token: Some("  ".to_string()),
            ..ApiSettings::default()
        })
        .unwrap();
        assert!(api.token.is_none());
    }

    #[test]
    fn test_rejection_reads_code_and_detail() {
        let err = HttpScheduleApi::rejection(
            400,
            br#"{"code": "already_assigned", "detail": "Slot taken"}"#,
        );
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                code: Some("already_assigned".to_string()),
                message: "Slot taken".to_string(),
            }
        );
    }

    #[test]
    fn test_rejection_falls_back_to_raw_body_and_status() {
        let err = HttpScheduleApi::rejection(502, b"Bad Gateway");
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 502,
                code: None,
                message: "Bad Gateway".to_string(),
            }
        );

        let err = HttpScheduleApi::rejection(500, b"");
        assert!(matches!(err, ApiError::Rejected { message, .. } if message == "HTTP status 500"));
    }
}
