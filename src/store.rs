//! The facade over one storage node: add, read, fetch, and pin operations.
//!
//! Every operation builds its own `ApiClient`, so the connection resources
//! live exactly as long as the call and are released on all exit paths.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use walkdir::WalkDir;

use crate::api::v0::add::{AddFile, AddRequest};
use crate::api::v0::cat::CatRequest;
use crate::api::v0::ls::LsRequest;
use crate::api::v0::pin::{PinInfo, PinLsRequest, PinRmRequest, PinTypeFilter};
use crate::api::{ApiClient, ApiError, REQUEST_TIMEOUT};
use crate::endpoint::Endpoint;
use crate::ledger::{ContentRecord, Ledger};

use std::collections::BTreeMap;

/// Failure of a ledgered add operation. `LedgerWrite` means the uploads
/// succeeded on the node but the local ledger could not be written; the
/// records it carries were never persisted and would otherwise be lost
/// silently.
#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("content was added to the node but the ledger at {path} could not be written: {source}")]
    LedgerWrite {
        path: PathBuf,
        records: Vec<ContentRecord>,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Store {
    endpoint: Endpoint,
}

impl Store {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Upload files in order and append one ledger row per file.
    ///
    /// All-or-nothing: a failed upload aborts the remaining ones and
    /// discards the records already collected in this call, so the ledger
    /// is either extended by every input or untouched.
    pub async fn add_files(
        &self,
        paths: &[PathBuf],
        ledger: &Ledger,
    ) -> Result<Vec<ContentRecord>, AddError> {
        if paths.is_empty() {
            return Err(ApiError::InvalidArgument("at least one file is required".into()).into());
        }

        tracing::info!("opening connection to node at {}", self.endpoint);
        let client = ApiClient::new(&self.endpoint)?;

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let name = file_name_of(path)?;
            let bytes = tokio::fs::read(path).await.map_err(ApiError::Io)?;
            tracing::info!("adding {} ({} bytes)", name, bytes.len());

            let response = client.call(AddRequest::single(name, bytes)).await?;
            let entry = response.entries.into_iter().next().ok_or_else(|| {
                ApiError::Decode(serde::de::Error::custom(format!(
                    "node returned no entry for {}",
                    path.display()
                )))
            })?;
            records.push(ContentRecord::from(entry));
        }

        self.write_ledger(ledger, records)
    }

    /// Recursively add a directory in one request, asking the node to pin
    /// the result, and append one ledger row per entry the node reports
    /// (each file plus each directory level).
    pub async fn add_directory(
        &self,
        dir: &Path,
        ledger: &Ledger,
    ) -> Result<Vec<ContentRecord>, AddError> {
        if !dir.is_dir() {
            return Err(
                ApiError::InvalidArgument(format!("{} is not a directory", dir.display())).into(),
            );
        }
        let root = file_name_of(dir)?;

        let mut files = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| ApiError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            // Part names are slash-separated paths rooted at the directory
            // name; the node rebuilds the tree from them.
            let relative = entry
                .path()
                .strip_prefix(dir)
                .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
            let name = std::iter::once(root.as_str())
                .chain(relative.iter().map(|c| c.to_str().unwrap_or_default()))
                .collect::<Vec<_>>()
                .join("/");
            let bytes = tokio::fs::read(entry.path()).await.map_err(ApiError::Io)?;
            files.push(AddFile { name, bytes });
        }
        if files.is_empty() {
            return Err(
                ApiError::InvalidArgument(format!("{} contains no files", dir.display())).into(),
            );
        }

        tracing::info!("opening connection to node at {}", self.endpoint);
        let client = ApiClient::new(&self.endpoint)?;

        tracing::info!("adding directory {} ({} files)", dir.display(), files.len());
        let response = client.call(AddRequest::tree(files)).await?;
        let records = response
            .entries
            .into_iter()
            .map(ContentRecord::from)
            .collect();

        self.write_ledger(ledger, records)
    }

    fn write_ledger(
        &self,
        ledger: &Ledger,
        records: Vec<ContentRecord>,
    ) -> Result<Vec<ContentRecord>, AddError> {
        tracing::info!("writing {} rows to {}", records.len(), ledger.path().display());
        match ledger.append(&records) {
            Ok(()) => Ok(records),
            Err(source) => Err(AddError::LedgerWrite {
                path: ledger.path().to_path_buf(),
                records,
                source,
            }),
        }
    }

    /// Fetch the full bytes of a leaf object. A directory id is rejected
    /// with `ApiError::IsDirectory` rather than a generic error response.
    pub async fn read_content(&self, cid: &str) -> Result<Vec<u8>, ApiError> {
        let client = ApiClient::with_timeout(&self.endpoint, REQUEST_TIMEOUT)?;
        match client.call(CatRequest::new(cid)).await {
            Err(ApiError::ErrorResponse { body, .. }) if is_directory_error(&body) => {
                Err(ApiError::IsDirectory {
                    cid: cid.to_string(),
                })
            }
            other => other,
        }
    }

    /// Mirror the object graph rooted at `cid` under `target`, the way the
    /// node's own `get` would: a directory becomes `target/<cid>/...`, a
    /// lone file becomes `target/<cid>`.
    pub async fn fetch_to_path(&self, cid: &str, target: &Path) -> Result<(), ApiError> {
        let client = ApiClient::with_timeout(&self.endpoint, REQUEST_TIMEOUT)?;
        tokio::fs::create_dir_all(target).await?;
        self.fetch_node(&client, cid, target.join(cid)).await
    }

    // Async recursion needs the boxed future.
    fn fetch_node<'a>(
        &'a self,
        client: &'a ApiClient,
        cid: &'a str,
        dest: PathBuf,
    ) -> Pin<Box<dyn Future<Output = Result<(), ApiError>> + Send + 'a>> {
        Box::pin(async move {
            let listing = client.call(LsRequest::new(cid)).await?;
            let entries = listing.directory_entries();

            if entries.is_empty() {
                let bytes = client.call(CatRequest::new(cid)).await?;
                tracing::info!("writing {} ({} bytes)", dest.display(), bytes.len());
                tokio::fs::write(&dest, bytes).await?;
                return Ok(());
            }

            tokio::fs::create_dir_all(&dest).await?;
            for link in entries {
                let child = dest.join(&link.name);
                if link.is_directory() {
                    self.fetch_node(client, &link.hash, child).await?;
                } else {
                    let bytes = client.call(CatRequest::new(&link.hash)).await?;
                    tracing::info!("writing {} ({} bytes)", child.display(), bytes.len());
                    tokio::fs::write(&child, bytes).await?;
                }
            }
            Ok(())
        })
    }

    /// List pins. With no ids, every pin matching the filter; with ids,
    /// one query per id merged in caller order, last write wins.
    ///
    /// An empty map is a genuinely empty result; failures are errors.
    pub async fn list_pins(
        &self,
        cids: &[String],
        filter: PinTypeFilter,
    ) -> Result<BTreeMap<String, PinInfo>, ApiError> {
        let client = ApiClient::with_timeout(&self.endpoint, REQUEST_TIMEOUT)?;

        if cids.is_empty() {
            let response = client.call(PinLsRequest { cid: None, filter }).await?;
            return Ok(response.keys);
        }

        let mut merged = BTreeMap::new();
        for cid in cids {
            let response = client
                .call(PinLsRequest {
                    cid: Some(cid.clone()),
                    filter,
                })
                .await?;
            merged.extend(response.keys);
        }
        Ok(merged)
    }

    /// Unpin an id. The node rejects ids that are not pinned, which comes
    /// back as `ApiError::ErrorResponse`. Never touches the ledger.
    pub async fn remove_pin(&self, cid: &str) -> Result<Vec<String>, ApiError> {
        let client = ApiClient::with_timeout(&self.endpoint, REQUEST_TIMEOUT)?;
        let response = client.call(PinRmRequest::new(cid)).await?;
        Ok(response.pins)
    }
}

fn file_name_of(path: &Path) -> Result<String, ApiError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| {
            ApiError::InvalidArgument(format!("{} has no usable file name", path.display()))
        })
}

fn is_directory_error(body: &str) -> bool {
    body.contains("is a directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_error_detection() {
        assert!(is_directory_error(
            r#"{"Message":"this dag node is a directory","Code":0,"Type":"error"}"#
        ));
        assert!(!is_directory_error(
            r#"{"Message":"invalid path","Code":0,"Type":"error"}"#
        ));
    }

    #[test]
    fn test_file_name_of_rejects_bare_root() {
        assert!(file_name_of(Path::new("/")).is_err());
        assert_eq!(file_name_of(Path::new("dir/a.txt")).unwrap(), "a.txt");
    }
}
