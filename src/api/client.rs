use std::time::Duration;

use reqwest::{Client, Url};

use super::error::ApiError;
use super::ApiRequest;
use crate::endpoint::Endpoint;

/// Fixed request timeout for read/fetch/pin operations. Add operations use
/// the client default (unbounded) because large uploads have no sane fixed
/// bound.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin wrapper over `reqwest::Client` bound to one node endpoint.
///
/// Constructed fresh per operation; dropping it releases the connection
/// pool on every exit path.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    /// Client with no request timeout.
    pub fn new(endpoint: &Endpoint) -> Result<Self, ApiError> {
        Self::build(endpoint, None)
    }

    /// Client with a fixed per-request timeout.
    pub fn with_timeout(endpoint: &Endpoint, timeout: Duration) -> Result<Self, ApiError> {
        Self::build(endpoint, Some(timeout))
    }

    fn build(endpoint: &Endpoint, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = endpoint.base_url()?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Http)?;

        Ok(Self { base_url, client })
    }

    pub async fn call<T: ApiRequest>(&self, request: T) -> Result<T::Response, ApiError> {
        let request_builder = request.build_request(&self.base_url, &self.client);
        let response = request_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::ErrorResponse { status, body });
        }

        T::parse_response(response).await
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
