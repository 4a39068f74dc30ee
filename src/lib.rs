// Client modules
pub mod api;
pub mod endpoint;
pub mod ledger;
pub mod store;

// Re-exports for consumers (CLI, tests)
pub use api::{ApiClient, ApiError};
pub use endpoint::Endpoint;
pub use ledger::{ContentRecord, Ledger, LedgerSchema};
pub use store::Store;
