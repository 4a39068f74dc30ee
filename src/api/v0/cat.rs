use reqwest::{Client, RequestBuilder, Response, Url};

use crate::api::{ApiError, ApiRequest};

/// Fetch the raw bytes of a leaf object.
#[derive(Debug, Clone)]
pub struct CatRequest {
    pub cid: String,
}

impl CatRequest {
    pub fn new(cid: impl Into<String>) -> Self {
        Self { cid: cid.into() }
    }
}

#[async_trait::async_trait]
impl ApiRequest for CatRequest {
    type Response = Vec<u8>;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/cat").unwrap();
        client.post(full_url).query(&[("arg", self.cid)])
    }

    async fn parse_response(response: Response) -> Result<Vec<u8>, ApiError> {
        let bytes = response.bytes().await.map_err(ApiError::Http)?;
        Ok(bytes.to_vec())
    }
}
