//! HTTP client abstraction
//!
//! Provider fetchers talk to the network through [`HttpClient`] so tests can
//! substitute canned responses. Requests are single-shot: no retry and no
//! timeout are configured.

use crate::constants::USER_AGENT;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, warn};

/// Transport-level failure of one request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}

/// Asynchronous HTTP operations used by the provider fetchers
pub trait HttpClient: Send + Sync {
    /// GET `url` with extra request headers, returning the body
    fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;

    /// POST a JSON document to `url`, returning the body
    fn post_json(
        &self,
        url: &str,
        json_body: &str,
    ) -> impl Future<Output = Result<Vec<u8>, HttpError>> + Send;
}

/// [`HttpClient`] backed by reqwest
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| HttpError::Request {
                url: String::new(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    async fn send(
        &self,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, HttpError> {
        let response = match request.send().await {
            Ok(response) => {
                debug!(
                    url = url,
                    status = response.status().as_u16(),
                    "HTTP response received"
                );
                response
            }
            Err(e) => {
                warn!(url = url, error = %e, is_connect = e.is_connect(), "HTTP request failed");
                return Err(HttpError::Request {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        };

        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(HttpError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<Vec<u8>, HttpError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.send(url, request).await
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<Vec<u8>, HttpError> {
        let request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(json_body.to_string());
        self.send(url, request).await
    }
}
