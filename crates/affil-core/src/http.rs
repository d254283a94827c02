//! HTTP transport for E-utilities requests
//!
//! One attempt per request: no retry, backoff, or throttling.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Could not build HTTP client: {message}")]
    Build { message: String },
    #[error("Could not reach {url}: {message}")]
    Connect { url: String, message: String },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("No response within {secs}s")]
    Timeout { secs: u64 },
    #[error("Rate limited")]
    RateLimited,
    #[error("Unreadable response body: {message}")]
    Body { message: String },
}

/// Thin wrapper over a configured `reqwest::Client` that returns response
/// bodies as text.
pub struct HttpClient {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Build {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
            timeout,
        })
    }

    /// GET `url` with `params` appended to the query string
    pub async fn get(&self, url: &Url, params: &[(&str, &str)]) -> Result<String, HttpError> {
        let mut url = url.clone();
        url.query_pairs_mut().extend_pairs(params);
        self.send(&url, self.client.get(url.clone())).await
    }

    /// POST `params` form-encoded; for id lists too long for a query string
    pub async fn post_form(&self, url: &Url, params: &[(&str, &str)]) -> Result<String, HttpError> {
        self.send(url, self.client.post(url.clone()).form(params)).await
    }

    async fn send(&self, url: &Url, request: RequestBuilder) -> Result<String, HttpError> {
        let response = request
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout {
                        secs: self.timeout.as_secs(),
                    }
                } else {
                    HttpError::Connect {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(HttpError::RateLimited);
        }
        if !status.is_success() {
            return Err(HttpError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        tracing::debug!(%url, status = status.as_u16(), "HTTP response");

        response.text().await.map_err(|e| HttpError::Body {
            message: e.to_string(),
        })
    }
}
