use std::collections::BTreeMap;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiRequest};

/// Pin type filter accepted by the node's pin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PinTypeFilter {
    #[default]
    All,
    Direct,
    Indirect,
    Recursive,
}

impl PinTypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PinTypeFilter::All => "all",
            PinTypeFilter::Direct => "direct",
            PinTypeFilter::Indirect => "indirect",
            PinTypeFilter::Recursive => "recursive",
        }
    }
}

/// Metadata the node reports for one pinned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinInfo {
    #[serde(rename = "Type")]
    pub pin_type: String,
}

/// List pins, either every pin matching the filter or a single id.
#[derive(Debug, Clone)]
pub struct PinLsRequest {
    pub cid: Option<String>,
    pub filter: PinTypeFilter,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinLsResponse {
    #[serde(rename = "Keys", default)]
    pub keys: BTreeMap<String, PinInfo>,
}

#[async_trait::async_trait]
impl ApiRequest for PinLsRequest {
    type Response = PinLsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/pin/ls").unwrap();
        let mut builder = client
            .post(full_url)
            .query(&[("type", self.filter.as_str())]);
        if let Some(cid) = self.cid {
            builder = builder.query(&[("arg", cid)]);
        }
        builder
    }

    async fn parse_response(response: Response) -> Result<PinLsResponse, ApiError> {
        Ok(response
            .json::<PinLsResponse>()
            .await
            .map_err(ApiError::Http)?)
    }
}

/// Unpin an id. The node rejects ids that are not currently pinned.
#[derive(Debug, Clone)]
pub struct PinRmRequest {
    pub cid: String,
}

impl PinRmRequest {
    pub fn new(cid: impl Into<String>) -> Self {
        Self { cid: cid.into() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinRmResponse {
    #[serde(rename = "Pins", default)]
    pub pins: Vec<String>,
}

#[async_trait::async_trait]
impl ApiRequest for PinRmRequest {
    type Response = PinRmResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/pin/rm").unwrap();
        client.post(full_url).query(&[("arg", self.cid)])
    }

    async fn parse_response(response: Response) -> Result<PinRmResponse, ApiError> {
        Ok(response
            .json::<PinRmResponse>()
            .await
            .map_err(ApiError::Http)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin_ls_keys() {
        let response: PinLsResponse = serde_json::from_str(
            r#"{"Keys":{"QmA":{"Type":"recursive"},"QmB":{"Type":"direct"}}}"#,
        )
        .unwrap();
        assert_eq!(response.keys.len(), 2);
        assert_eq!(response.keys["QmA"].pin_type, "recursive");
    }

    #[test]
    fn test_filter_wire_names() {
        assert_eq!(PinTypeFilter::All.as_str(), "all");
        assert_eq!(PinTypeFilter::Recursive.as_str(), "recursive");
    }
}
