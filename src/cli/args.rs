pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pinlog")]
#[command(version)]
#[command(about = "Add, fetch, and pin content on a storage node, with a local audit ledger")]
pub struct Args {
    /// Address of the node's RPC API
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port of the node's RPC API (5001; the gateway also serves 8080)
    #[arg(long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: crate::Command,
}
