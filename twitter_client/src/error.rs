use reqwest::StatusCode;
use thiserror::Error;

use crate::consts::{NOT_FOUND_CODES, RATE_LIMIT_CODE};
use crate::response::ErrorResponse;

pub type Result<T> = std::result::Result<T, Error>;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rate limit: {0}")]
    RateLimit(String),
    #[error("API error {code}: {message}")]
    ApiError { code: u32, message: String },
    #[error("Invalid bearer token")]
    InvalidToken,
    #[error("Cannot encode/decode JSON: {0}")]
    JSONError(#[from] serde_json::Error),
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Connection Error: {0}")]
    ConnectionError(String),
    #[error("Network Error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Cannot parse URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl Error {
    /// Whether the failure happened while reaching the server, so a retry may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::ConnectionError(_))
    }

    /// Connection and timeout failures become `ConnectionError`, the rest stay `NetworkError`.
    pub(crate) fn from_send(err: reqwest::Error) -> Error {
        if err.is_connect() || err.is_timeout() {
            Error::ConnectionError(err.to_string())
        } else {
            Error::NetworkError(err)
        }
    }

    /// Classify a failed response by the error code in its body, falling back to the HTTP status.
    /// Returns `None` when neither says anything more specific than a generic HTTP failure.
    pub(crate) fn from_response(status: StatusCode, content: &str, target: &str) -> Option<Error> {
        let api_error = serde_json::from_str::<ErrorResponse>(content)
            .ok()
            .and_then(|r| r.errors.into_iter().next());
        match api_error {
            Some(e) if NOT_FOUND_CODES.contains(&e.code) => Some(Error::NotFound(format!("{}: {}", target, e.message))),
            Some(e) if e.code == RATE_LIMIT_CODE => Some(Error::RateLimit(e.message)),
            Some(e) => Some(Error::ApiError {
                code: e.code,
                message: e.message,
            }),
            None if status == StatusCode::NOT_FOUND => Some(Error::NotFound(target.to_string())),
            None if status == StatusCode::TOO_MANY_REQUESTS => Some(Error::RateLimit(target.to_string())),
            None => None,
        }
    }
}
