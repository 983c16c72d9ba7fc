//! Edge Function client.
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": "Concert not found" }
//! ```
//!
//! [`EdgeClient`] sends the bearer anon key, decodes the envelope and maps
//! failures onto [`ApiError`]. Calls are single attempts; wrap them in a
//! [`RetryPolicy`] where a retry makes sense.

mod endpoints;

use std::future::Future;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{best_effort_message, ApiError, ApiResult};
use crate::workflow::Ticker;

// =============================================================================
// Envelope
// =============================================================================

/// `{ success, data?, error? }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    fn failure(&self) -> ApiError {
        ApiError::Backend(best_effort_message(self.error.as_deref(), self.message.as_deref()))
    }

    /// The payload of a successful envelope.
    pub fn into_data<T: DeserializeOwned>(self) -> ApiResult<T> {
        if !self.success {
            return Err(self.failure());
        }
        let data = self.data.ok_or(ApiError::MissingData)?;
        serde_json::from_value(data).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Success without caring about the payload.
    pub fn into_ack(self) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(self.failure())
        }
    }
}

/// Parses a response body. Bodies that are not an envelope become
/// [`ApiError::Status`] on error statuses and [`ApiError::InvalidResponse`] otherwise.
pub fn parse_envelope(status: u16, body: &str) -> ApiResult<Envelope> {
    match serde_json::from_str::<Envelope>(body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !(200..300).contains(&status) => Err(ApiError::Status {
            status,
            body: truncate(body, 200),
        }),
        Err(e) => Err(ApiError::InvalidResponse(e.to_string())),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

// =============================================================================
// Retry
// =============================================================================

/// Default number of attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay between attempts in milliseconds
pub const RETRY_DELAY_MS: u64 = 1000;

/// Re-runs a call on transport failures and 5xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Single attempt.
    pub const NONE: RetryPolicy = RetryPolicy { max_attempts: 1, delay: Duration::ZERO };

    pub async fn run<T, F, Fut, Tk>(&self, ticker: &Tk, mut call: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
        Tk: Ticker,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    log::warn!("attempt {}/{} failed: {}", attempt, attempts, e);
                    log::info!("retrying in {}ms", self.delay.as_millis());
                    ticker.sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// Client for the dashboard's Edge Function.
#[derive(Debug, Clone)]
pub struct EdgeClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl EdgeClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    /// Create a client from `SUPABASE_PROJECT_ID` / `SUPABASE_ANON_KEY`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL of `path` (which starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        log::debug!("{} {}", method, path);
        self.http
            .request(method, self.url(path))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.anon_key))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Envelope> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)).await?.into_data()
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await?.into_data()
    }

    pub(crate) async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send(self.request(Method::POST, path).json(body)).await?.into_ack()
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body)).await?.into_data()
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, path)).await?.into_ack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Concert;
    use crate::workflow::ImmediateTicker;
    use std::cell::Cell;

    #[test]
    fn test_success_envelope() {
        let env = parse_envelope(200, r#"{"success":true,"data":{"id":"c-1","title":"Тур","createdAt":"2026-01-01T00:00:00Z"}}"#).unwrap();
        let concert: Concert = env.into_data().unwrap();
        assert_eq!(concert.id, "c-1");
    }

    #[test]
    fn test_failure_envelope_message_chain() {
        let env = parse_envelope(400, r#"{"success":false,"error":"Concert not found"}"#).unwrap();
        assert_eq!(env.into_ack().unwrap_err().user_message(), "Concert not found");

        let env = parse_envelope(400, r#"{"success":false,"message":"Bad input"}"#).unwrap();
        assert_eq!(env.into_ack().unwrap_err().user_message(), "Bad input");

        let env = parse_envelope(500, r#"{"success":false}"#).unwrap();
        let err = env.into_ack().unwrap_err();
        assert_eq!(err.user_message(), "Неизвестная ошибка");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_non_envelope_bodies() {
        let err = parse_envelope(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
        assert!(err.is_retryable());

        let err = parse_envelope(200, "not json").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_missing_data() {
        let env = parse_envelope(200, r#"{"success":true}"#).unwrap();
        assert!(matches!(env.into_data::<Concert>(), Err(ApiError::MissingData)));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Ошибка сервера", 6), "Ошибка…");
        assert_eq!(truncate("ok", 6), "ok");
    }

    #[test]
    fn test_url() {
        let client = EdgeClient::new(ApiConfig::new("abcd1234", "anon").unwrap());
        assert_eq!(
            client.url("/banners/b-1/approve"),
            "https://abcd1234.supabase.co/functions/v1/make-server-84730125/banners/b-1/approve"
        );
    }

    #[tokio::test]
    async fn test_retry_on_server_errors_only() {
        let calls = Cell::new(0);
        let result: ApiResult<u32> = RetryPolicy::default()
            .run(&ImmediateTicker, || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(ApiError::Status { status: 503, body: String::new() })
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 3);

        calls.set(0);
        let result: ApiResult<()> = RetryPolicy::default()
            .run(&ImmediateTicker, || {
                calls.set(calls.get() + 1);
                async { Err(ApiError::Backend("Недостаточно монет".into())) }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let calls = Cell::new(0);
        let result: ApiResult<()> = RetryPolicy::default()
            .run(&ImmediateTicker, || {
                calls.set(calls.get() + 1);
                async { Err(ApiError::Status { status: 500, body: String::new() }) }
            })
            .await;
        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
        assert_eq!(calls.get(), DEFAULT_MAX_ATTEMPTS);
    }
}
