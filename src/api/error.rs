use thiserror::Error;

/// Failure to map an email address to a provider user id.
///
/// `NotFound` is the expected directory answer and is tolerated by the
/// reconciler; `Transport` covers requests that never produced a usable
/// answer (connection failure, malformed body). The batch treats both as
/// "skip this candidate", never as fatal.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("user not found: {email} (status {status})")]
    NotFound { email: String, status: u16 },
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ResolveError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Failure of a relationship write (or other plain resource call).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
