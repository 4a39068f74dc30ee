// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use cli::{args::Args, op::Op, Add, AddDir, Cat, Get, Pin, Version};

command_enum! {
    (Add, Add),
    (AddDir, AddDir),
    (Cat, Cat),
    (Get, Get),
    (Pin, Pin),
    (Version, Version),
}

/// Initialize tracing. The returned guard must be kept alive for the
/// duration of the program.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let (stderr_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stderr_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    guard
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let _guard = init_logging();

    // Resolve endpoint: explicit flags > built-in node defaults
    let endpoint = cli::op::resolve_endpoint(args.host, args.port);
    let ctx = cli::op::OpContext::new(endpoint);

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
