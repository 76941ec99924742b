use thiserror::Error;

/// Reasons a live fetch did not produce readings.
///
/// None of these reach the dashboard; [`crate::DataProvider::fetch_readings`]
/// replaces them with the fallback dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Search provider unreachable: {0}")]
    Unreachable(String),

    #[error("Search provider quota or rate limit exceeded")]
    RateLimited,

    #[error("Search provider unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Search request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Search provider returned no text")]
    EmptyResponse,

    #[error("Response is not valid JSON: {0}")]
    Malformed(String),

    #[error("Response JSON does not match the reading shape: {0}")]
    InvalidShape(String),

    #[error("Search provider is offline")]
    Offline,
}
