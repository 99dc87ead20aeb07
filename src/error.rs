use thiserror::Error;

/// Failure taxonomy for the Conformity API boundary.
///
/// Every network, decoding and date-parsing failure is normalized into one
/// of these kinds at the point where it happens; callers never see raw
/// transport errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http error {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("received invalid JSON from the server")]
    InvalidJson,

    #[error("request to the API failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("invalid date format: {0}")]
    InvalidDateFormat(#[from] chrono::ParseError),
}
