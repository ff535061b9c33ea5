use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::registry::RegistryError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    RegistryUnavailable(String),
    InternalServerError(anyhow::Error),
}

impl AppError {
    pub fn bad_request<T>(t: T) -> Self
    where
        T: ToString,
    {
        AppError::BadRequest(t.to_string())
    }

    pub fn from_registry(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(m) => AppError::BadRequest(m),
            other => AppError::RegistryUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err).into_response(),
            AppError::RegistryUnavailable(err) => {
                (StatusCode::BAD_GATEWAY, err).into_response()
            }
            AppError::InternalServerError(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::InternalServerError(err.into())
    }
}
