/*!
 * Ollama client used as the default text generator.
 */

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerationRequest, TextGenerator};
use crate::errors::ProviderError;

/// Default Ollama endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default bound on a single generation call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Ollama client for the `/api/generate` endpoint
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Request timeout, also reported in timeout errors
    timeout: Duration,
    /// Maximum number of retry attempts after the first call
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Generation response from the Ollama API
///
/// Only `response` is read; a body without it yields an empty text.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

impl OllamaGenerator {
    /// Create a client for an endpoint with the default timeout and no retries
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::new_with_config(endpoint, DEFAULT_TIMEOUT, 0, 1000)
    }

    /// Create a client with configuration
    ///
    /// Ollama uses HTTP/1.1, so the client is pinned to it.
    pub fn new_with_config(
        endpoint: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Self {
        let base_url = endpoint.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            client: Client::builder()
                .timeout(timeout)
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            timeout,
            max_retries,
            backoff_base_ms,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request, without retries
    async fn send_once(&self, url: &str, request: &GenerationRequest) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let parsed: GenerationResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to parse Ollama API response: {}. Raw response (first 500 chars): {}",
                e,
                body.chars().take(500).collect::<String>()
            );
            ProviderError::ParseError(e.to_string())
        })?;

        Ok(parsed.response)
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::ConnectionError(e.to_string())
        }
    }

    /// Get the Ollama API version
    pub async fn version(&self) -> Result<String> {
        let url = format!("{}/api/version", self.base_url);
        let response: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to Ollama")?
            .json()
            .await
            .context("Failed to parse Ollama version response")?;

        let version = response["version"]
            .as_str()
            .ok_or_else(|| anyhow!("Invalid version format in response"))?
            .to_string();

        Ok(version)
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    /// Generate text, retrying server and transport errors up to `max_retries` times
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let mut attempt = 0;

        loop {
            let err = match self.send_once(&url, &request).await {
                Ok(text) => return Ok(text),
                Err(err) => err,
            };

            let retryable = match &err {
                ProviderError::ApiError { status_code, .. } => *status_code >= 500,
                ProviderError::ConnectionError(_) | ProviderError::Timeout(_) => true,
                ProviderError::ParseError(_) | ProviderError::Cancelled => false,
            };

            error!(
                "Ollama API error: {} - attempt {}/{}",
                err,
                attempt + 1,
                self.max_retries + 1
            );

            if !retryable || attempt >= self.max_retries {
                return Err(err);
            }

            attempt += 1;
            let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1).min(16));
            debug!("Retrying Ollama request in {}ms", backoff_ms);
            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
        }
    }
}
