use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use thread_core::Error as ThreadError;
use thread_util::ParsingError;

use crate::view;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        let status = self.status_code();
        let page = view::error_page(status, &self.to_string());
        (status, Html(page.into_string())).into_response()
    }
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        status_code(&self.0)
    }
}

fn status_code(err: &anyhow::Error) -> StatusCode {
    for cause in err.chain() {
        if cause.downcast_ref::<ParsingError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        if let Some(err) = cause.downcast_ref::<ThreadError>() {
            match err {
                ThreadError::InvalidInput(_) => return StatusCode::BAD_REQUEST,
                ThreadError::UnknownItemType(_) => return StatusCode::BAD_REQUEST,
                ThreadError::ObjectNotFound(_) => return StatusCode::NOT_FOUND,
                ThreadError::RateLimit(_) => return StatusCode::TOO_MANY_REQUESTS,
                // Transparent errors skip themselves in the chain.
                ThreadError::Other(inner) => return status_code(inner),
                _ => return StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
        if let Some(err) = cause.downcast_ref::<twitter_client::Error>() {
            match err {
                twitter_client::Error::NotFound(_) => return StatusCode::NOT_FOUND,
                twitter_client::Error::RateLimit(_) => return StatusCode::TOO_MANY_REQUESTS,
                twitter_client::Error::ApiError { .. } => return StatusCode::BAD_GATEWAY,
                twitter_client::Error::ConnectionError(_) => return StatusCode::BAD_GATEWAY,
                twitter_client::Error::NetworkError(_) => return StatusCode::BAD_GATEWAY,
                _ => return StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }
    StatusCode::INTERNAL_SERVER_ERROR
}
