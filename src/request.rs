//! Authenticated HTTP requests.
//!
//! Low-level layer that attaches the bearer token, sends one request and
//! converts non-success statuses into typed errors. No retries.

use std::sync::Arc;

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{CarbonArcError, Result};

/// Sends authenticated requests to fully qualified URLs.
///
/// Cheaply cloneable; clones share the underlying connection pool and token.
#[derive(Clone)]
pub struct RequestManager {
    http: Client,
    token: Arc<str>,
}

impl std::fmt::Debug for RequestManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestManager").finish_non_exhaustive()
    }
}

impl RequestManager {
    /// Build a request manager from a config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(CarbonArcError::HttpError)?;

        Ok(Self {
            http,
            token: Arc::from(config.token.as_str()),
        })
    }

    /// GET `url` and decode the JSON body.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(Url::parse(url)?)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CarbonArcError::HttpError)?;

        Self::json(Self::check_response(response).await?).await
    }

    /// POST a JSON body to `url` and decode the JSON response.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(Url::parse(url)?)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(CarbonArcError::HttpError)?;

        Self::json(Self::check_response(response).await?).await
    }

    /// GET `url` and hand back the unread response for streaming.
    ///
    /// The status has already been checked; the body has not been read.
    #[tracing::instrument(skip(self))]
    pub async fn get_stream(&self, url: &str) -> Result<Response> {
        let response = self
            .http
            .get(Url::parse(url)?)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(CarbonArcError::HttpError)?;

        Self::check_response(response).await
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(CarbonArcError::HttpError)?;
        if bytes.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "received response");

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = if status == StatusCode::TOO_MANY_REQUESTS {
            response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
        } else {
            None
        };

        let body = response.text().await.unwrap_or_default();
        let message = Self::extract_error_message(&body, status);
        tracing::warn!(status = status.as_u16(), %message, "request failed");
        Err(CarbonArcError::from_status(
            status.as_u16(),
            message,
            body,
            retry_after,
        ))
    }

    /// Extract error message from a failed response body.
    fn extract_error_message(body: &str, status: StatusCode) -> String {
        if body.is_empty() {
            return format!("HTTP {status}");
        }

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            for field in ["message", "detail", "error"] {
                if let Some(msg) = json.get(field).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
        }

        body.to_string()
    }
}
