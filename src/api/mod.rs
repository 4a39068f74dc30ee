mod client;
mod error;
pub mod v0;

pub use client::{ApiClient, REQUEST_TIMEOUT};
pub use error::ApiError;

use reqwest::{Client, RequestBuilder, Response, Url};

/// One RPC operation against the node.
///
/// `build_request` shapes the outgoing call; `parse_response` decodes a
/// successful reply (add streams NDJSON and cat streams raw bytes, so a
/// blanket JSON decode does not fit every endpoint).
#[async_trait::async_trait]
pub trait ApiRequest {
    type Response;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder;

    async fn parse_response(response: Response) -> Result<Self::Response, ApiError>;
}
