use std::path::PathBuf;

use clap::Args;
use pinlog::ApiError;

#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Content id of the file or directory to download
    pub cid: String,

    /// Local directory to mirror the content into
    #[arg(long, default_value = ".")]
    pub output: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum GetError {
    #[error("request timed out; the content id {cid} may not be valid")]
    Timeout {
        cid: String,
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    Api(ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Get {
    type Error = GetError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        match ctx.store().fetch_to_path(&self.cid, &self.output).await {
            Ok(()) => Ok(format!(
                "fetched {} into {}",
                self.cid,
                self.output.display()
            )),
            Err(e @ ApiError::Timeout(_)) => Err(GetError::Timeout {
                cid: self.cid.clone(),
                source: e,
            }),
            Err(e) => Err(GetError::Api(e)),
        }
    }
}
