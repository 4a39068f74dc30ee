use clap::Args;
use pinlog::ApiError;

#[derive(Args, Debug, Clone)]
pub struct Rm {
    /// Content id to remove from the pin set
    pub cid: String,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rm {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pins = ctx.store().remove_pin(&self.cid).await?;
        Ok(format!("unpinned {}", pins.join(", ")))
    }
}
