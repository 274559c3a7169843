use rand::{thread_rng, Rng};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

use std::{thread, time::Duration};

const MAX_RETRIES: usize = 3;
const BASE_DELAY_MS: u64 = 800;
const TIMEOUT_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("no result in response")]
    EmptyResult,
}

fn backoff(attempt: usize) -> Duration {
    let jitter: u64 = thread_rng().gen_range(0..200);
    let ms = BASE_DELAY_MS * (2_u64.pow(attempt as u32)) + jitter;
    Duration::from_millis(ms)
}

// POSTs a JSON body and returns the raw response body. 408/429/5xx and
// transport errors are retried with exponential backoff; other HTTP errors
// fail fast with whatever message the endpoint put in its error JSON.
pub fn post_json(url: &str, body: &serde_json::Value) -> Result<String, ApiError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()?;

    let mut last_err: Option<ApiError> = None;

    for attempt in 0..MAX_RETRIES {
        match client.post(url).json(body).send() {
            Ok(resp) => {
                let status = resp.status();

                // Read as text first so a JSON error body is never lost.
                let text = match resp.text() {
                    Ok(t) => t,
                    Err(err) => {
                        last_err = Some(err.into());
                        thread::sleep(backoff(attempt));
                        continue;
                    }
                };

                if !status.is_success() {
                    last_err = Some(ApiError::Http {
                        status: status.as_u16(),
                        message: extract_error_message(&text),
                    });
                    if should_retry_http(status) && attempt + 1 < MAX_RETRIES {
                        thread::sleep(backoff(attempt));
                        continue;
                    }
                    break;
                }

                return Ok(text);
            }
            Err(err) => {
                last_err = Some(err.into());
                if attempt + 1 < MAX_RETRIES {
                    thread::sleep(backoff(attempt));
                }
            }
        }
    }

    Err(last_err.unwrap_or(ApiError::EmptyResult))
}

fn should_retry_http(status: StatusCode) -> bool {
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

fn extract_error_message(body_text: &str) -> String {
    // Both Google endpoints use { "error": { "message": ... } }; some
    // proxies flatten it to { "message": ... }.
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.len() > 400 {
        let snippet: String = trimmed.chars().take(400).collect();
        format!("{snippet}...")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses() {
        assert!(should_retry_http(StatusCode::REQUEST_TIMEOUT));
        assert!(should_retry_http(StatusCode::TOO_MANY_REQUESTS));
        assert!(should_retry_http(StatusCode::BAD_GATEWAY));
        assert!(!should_retry_http(StatusCode::BAD_REQUEST));
        assert!(!should_retry_http(StatusCode::FORBIDDEN));
    }

    #[test]
    fn extracts_nested_google_error_message() {
        let body = r#"{ "error": { "code": 403, "message": "API key invalid" } }"#;
        assert_eq!(extract_error_message(body), "API key invalid");
    }

    #[test]
    fn extracts_flat_message() {
        assert_eq!(extract_error_message(r#"{ "message": "nope" }"#), "nope");
    }

    #[test]
    fn falls_back_to_body_snippet() {
        assert_eq!(extract_error_message("<html>502</html>"), "<html>502</html>");
    }

    #[test]
    fn long_bodies_are_clipped() {
        let body = "x".repeat(1000);
        let msg = extract_error_message(&body);
        assert!(msg.ends_with("..."));
        assert_eq!(msg.chars().count(), 403);
    }

    #[test]
    fn backoff_grows_with_attempts() {
        assert!(backoff(0) >= Duration::from_millis(800));
        assert!(backoff(0) < Duration::from_millis(1000));
        assert!(backoff(2) >= Duration::from_millis(3200));
    }

    #[test]
    fn http_error_displays_status_and_message() {
        let err = ApiError::Http {
            status: 403,
            message: "API key invalid".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 403: API key invalid");
    }
}
