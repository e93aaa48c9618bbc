//! HTTP client implementation

use std::time::Duration;

use reqwest::{Client, Method, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::RelayError;

/// Timeout applied to every outbound request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-over-HTTP client rooted at a base URL
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: &str) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("hariko/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url.trim_end_matches('/'))?,
        })
    }

    /// Build a URL by appending path segments to the base URL.
    ///
    /// Segments are percent-encoded individually.
    pub fn url(&self, segments: &[&str]) -> Result<Url, RelayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RelayError::ConfigError(format!("Not a base URL: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a POST request
    ///
    /// `route` names the endpoint in logs so that secrets in the URL are never
    /// written out.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: Url,
        route: &str,
        body: &B,
    ) -> Result<T, RelayError> {
        self.send(Method::POST, url, route, body).await
    }

    /// Make a PATCH request
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        url: Url,
        route: &str,
        body: &B,
    ) -> Result<T, RelayError> {
        self.send(Method::PATCH, url, route, body).await
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: Url,
        route: &str,
        body: &B,
    ) -> Result<T, RelayError> {
        debug!("{} {}", method, route);

        let response = self
            .client
            .request(method.clone(), url)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP {} {} failed: {} - {}", method, route, status, body);
            return Err(RelayError::NotifyError(format!("{}: {}", status, body)));
        }

        let body = response.json().await?;
        Ok(body)
    }
}
