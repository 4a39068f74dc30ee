use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiRequest};

/// One file body for an add request. For directory adds the name carries
/// the slash-separated path relative to the directory being added, which is
/// how the node reconstructs the tree from a flat multipart form.
#[derive(Debug, Clone)]
pub struct AddFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct AddRequest {
    pub files: Vec<AddFile>,
    pub pin: bool,
}

impl AddRequest {
    pub fn single(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            files: vec![AddFile {
                name: name.into(),
                bytes,
            }],
            pin: true,
        }
    }

    pub fn tree(files: Vec<AddFile>) -> Self {
        Self { files, pin: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddedEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Hash")]
    pub hash: String,
    // The node emits Size as a decimal string.
    #[serde(rename = "Size", deserialize_with = "size_from_wire")]
    pub size: u64,
}

#[derive(Debug, Clone, Default)]
pub struct AddResponse {
    pub entries: Vec<AddedEntry>,
}

// Client implementation - builds request for this operation
#[async_trait::async_trait]
impl ApiRequest for AddRequest {
    type Response = AddResponse;

    fn build_request(self, base_url: &Url, client: &Client) -> RequestBuilder {
        let mut full_url = base_url.join("/api/v0/add").unwrap();
        full_url
            .query_pairs_mut()
            .append_pair("pin", if self.pin { "true" } else { "false" });

        let mut form = Form::new();
        for file in self.files {
            form = form.part("file", Part::bytes(file.bytes).file_name(file.name));
        }
        client.post(full_url).multipart(form)
    }

    // The node streams one JSON object per line, one per added entry.
    async fn parse_response(response: Response) -> Result<AddResponse, ApiError> {
        let text = response.text().await.map_err(ApiError::Http)?;
        let mut entries = Vec::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            entries.push(serde_json::from_str::<AddedEntry>(line)?);
        }
        Ok(AddResponse { entries })
    }
}

fn size_from_wire<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct SizeVisitor;

    impl serde::de::Visitor<'_> for SizeVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a byte size as an integer or decimal string")
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<u64, E> {
            v.parse().map_err(serde::de::Error::custom)
        }
    }

    deserializer.deserialize_any(SizeVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_with_string_size() {
        let entry: AddedEntry = serde_json::from_str(
            r#"{"Name":"a.txt","Hash":"QmbBzNiWyxr1hurr576inrQyxHmL2aHFQ6pVf47ZzzGooW","Size":"44"}"#,
        )
        .unwrap();
        assert_eq!(entry.name, "a.txt");
        assert_eq!(entry.size, 44);
    }

    #[test]
    fn test_parse_entry_with_numeric_size() {
        let entry: AddedEntry =
            serde_json::from_str(r#"{"Name":"a.txt","Hash":"Qmabc","Size":44}"#).unwrap();
        assert_eq!(entry.size, 44);
    }

    #[test]
    fn test_ndjson_lines_parse_in_order() {
        let body = "{\"Name\":\"dir/a.txt\",\"Hash\":\"Qm1\",\"Size\":\"3\"}\n\
                    {\"Name\":\"dir\",\"Hash\":\"Qm2\",\"Size\":\"61\"}\n";
        let mut entries = Vec::new();
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            entries.push(serde_json::from_str::<AddedEntry>(line).unwrap());
        }
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "dir/a.txt");
        assert_eq!(entries[1].hash, "Qm2");
    }
}
