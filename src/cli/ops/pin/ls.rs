use clap::Args;
use pinlog::api::v0::pin::PinTypeFilter;
use pinlog::ApiError;

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Content ids to query; lists every pin when empty
    pub cids: Vec<String>,

    /// Pin type to filter on
    #[arg(long = "type", value_enum, default_value = "all")]
    pub pin_type: PinTypeFilter,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = ApiError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pins = ctx.store().list_pins(&self.cids, self.pin_type).await?;

        if pins.is_empty() {
            return Ok("no pins found".to_string());
        }
        Ok(pins
            .iter()
            .map(|(cid, info)| format!("{} {}", cid, info.pin_type))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
