use reqwest::StatusCode;

/// Failure categories for node API calls.
///
/// Every operation returns one of these instead of printing and swallowing
/// the failure; the CLI boundary decides how to report it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("could not connect to node: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("request to node timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("node returned {status}: {body}")]
    ErrorResponse { status: StatusCode, body: String },
    #[error("content {cid} is a directory and cannot be displayed")]
    IsDirectory { cid: String },
    #[error("local I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode node response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else if err.is_connect() {
            ApiError::Connect(err)
        } else {
            ApiError::Http(err)
        }
    }
}

impl ApiError {
    /// True when the node rejected the request itself, as opposed to the
    /// transport or the local filesystem failing.
    pub fn is_error_response(&self) -> bool {
        matches!(self, ApiError::ErrorResponse { .. })
    }
}
