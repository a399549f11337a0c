//! Directory error types.

/// Errors from a charger directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Transport failure: no route, refused connection, timeout, reset.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON. `body` holds the first
    /// few hundred characters for logging.
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Non-success status other than 401 and 429.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("rate limited by charger directory")]
    RateLimited,

    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Local data source could not be read.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}
