use clap::Args;
use pinlog::ApiError;

#[derive(Args, Debug, Clone)]
pub struct Cat {
    /// Content id of the leaf object to display
    pub cid: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CatError {
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
impl crate::cli::op::Op for Cat {
    type Error = CatError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let bytes = match ctx.store().read_content(&self.cid).await {
            Ok(bytes) => bytes,
            Err(e @ ApiError::Timeout(_)) => {
                return Err(CatError::Timeout {
                    cid: self.cid.clone(),
                    source: e,
                })
            }
            Err(e) => return Err(CatError::Api(e)),
        };

        // Show text directly, binary content as hex
        match String::from_utf8(bytes.clone()) {
            Ok(text) => Ok(text),
            Err(_) => {
                let hex = bytes
                    .iter()
                    .map(|b| format!("{:02x}", b))
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(format!("binary content (hex): {}", hex))
            }
        }
    }
}
