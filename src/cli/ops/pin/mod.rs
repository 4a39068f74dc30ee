use clap::{Args, Subcommand};

pub mod ls;
pub mod rm;

use crate::cli::op::Op;

crate::command_enum! {
    (Ls, ls::Ls),
    (Rm, rm::Rm),
}

// Rename the generated Command to PinCommand for clarity
pub type PinCommand = Command;

#[derive(Args, Debug, Clone)]
pub struct Pin {
    #[command(subcommand)]
    pub command: PinCommand,
}

#[async_trait::async_trait]
impl Op for Pin {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
