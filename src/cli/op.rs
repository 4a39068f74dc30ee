use std::error::Error;

use pinlog::endpoint::{DEFAULT_HOST, DEFAULT_PORT};
use pinlog::{Endpoint, Store};

/// Context shared by every operation. Holds the endpoint only; each op
/// opens (and drops) its own connection to the node.
#[derive(Clone)]
pub struct OpContext {
    endpoint: Endpoint,
}

impl OpContext {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub fn store(&self) -> Store {
        Store::new(self.endpoint.clone())
    }
}

/// Resolve the node endpoint from CLI flags.
///
/// Priority: explicit `--host`/`--port` > built-in defaults (the docker
/// bridge address and RPC port).
pub fn resolve_endpoint(host: Option<String>, port: Option<u16>) -> Endpoint {
    Endpoint::new(
        host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port.unwrap_or(DEFAULT_PORT),
    )
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
