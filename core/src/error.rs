use reqwest::StatusCode;

/// Rejections raised before anything is sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("empty input")]
    Empty,
    #[error("too short")]
    TooShort,
}

/// Failures talking to the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),
    #[error("backend returned {0}")]
    Status(StatusCode),
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// Maps a `send()` failure, keeping builder problems separate from the wire.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidBaseUrl(err.to_string())
        } else {
            Self::Transport(err)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("network error: {0}")]
    Network(#[from] ClientError),
    #[error("an analysis request is already in flight")]
    Busy,
}

pub type ClientResult<T> = Result<T, ClientError>;
