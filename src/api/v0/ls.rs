use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiRequest};

/// Link type values the node uses in ls responses.
pub const LINK_TYPE_DIRECTORY: u32 = 1;
pub const LINK_TYPE_FILE: u32 = 2;

/// List the links of an object. Directory entries carry their names;
/// a leaf file's chunk links carry none.
#[derive(Debug, Clone)]
pub struct LsRequest {
    pub cid: String,
}

impl LsRequest {
    pub fn new(cid: impl Into<String>) -> Self {
        Self { cid: cid.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsLink {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "Size", default)]
    pub size: u64,
    #[serde(rename = "Type", default)]
    pub link_type: u32,
}

impl LsLink {
    pub fn is_directory(&self) -> bool {
        self.link_type == LINK_TYPE_DIRECTORY
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsObject {
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "Links", default)]
    pub links: Vec<LsLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsResponse {
    #[serde(rename = "Objects", default)]
    pub objects: Vec<LsObject>,
}

impl LsResponse {
    /// Named links of the first listed object; empty for a leaf file.
    pub fn directory_entries(&self) -> Vec<&LsLink> {
        self.objects
            .first()
            .map(|o| o.links.iter().filter(|l| !l.name.is_empty()).collect())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ApiRequest for LsRequest {
    type Response = LsResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let full_url = base_url.join("/api/v0/ls").unwrap();
        client.post(full_url).query(&[("arg", self.cid)])
    }

    async fn parse_response(response: Response) -> Result<LsResponse, ApiError> {
        Ok(response.json::<LsResponse>().await.map_err(ApiError::Http)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_listing_has_named_entries() {
        let response: LsResponse = serde_json::from_str(
            r#"{"Objects":[{"Hash":"QmDir","Links":[
                {"Name":"a.txt","Hash":"Qm1","Size":3,"Type":2},
                {"Name":"sub","Hash":"Qm2","Size":0,"Type":1}
            ]}]}"#,
        )
        .unwrap();
        let entries = response.directory_entries();
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_directory());
        assert!(entries[1].is_directory());
    }

    #[test]
    fn test_leaf_file_has_no_named_entries() {
        let response: LsResponse = serde_json::from_str(
            r#"{"Objects":[{"Hash":"QmFile","Links":[
                {"Name":"","Hash":"QmChunk","Size":262144,"Type":2}
            ]}]}"#,
        )
        .unwrap();
        assert!(response.directory_entries().is_empty());
    }
}
