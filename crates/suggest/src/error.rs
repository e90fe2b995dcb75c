use thiserror::Error;

/// Failures of a suggestion request.
///
/// These never reach callers of [`Suggester`](crate::Suggester): they are
/// logged and turned into an empty suggestion list.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response carried no text")]
    EmptyResponse,
}
