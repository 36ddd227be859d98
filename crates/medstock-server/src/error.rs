//! Error types for the medstock server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use medstock_core::LabelError;

use crate::flash::Flash;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Medicine {0} not found")]
    NotFound(i64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Label error: {0}")]
    Label(#[from] LabelError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(id) => {
                tracing::debug!(id, "medicine not found");
                Flash::warning("Medicine not found.").redirect("/")
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            AppError::Label(e) => {
                tracing::error!("Label error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{LOCATION, SET_COOKIE};

    #[test]
    fn test_not_found_redirects_with_warning() {
        let response = AppError::NotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");

        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        let value = cookie
            .strip_prefix("flash=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();
        assert_eq!(
            Flash::decode(value),
            Some(Flash::warning("Medicine not found."))
        );
    }

    #[test]
    fn test_io_error_is_internal() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let response = AppError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(AppError::NotFound(42).to_string(), "Medicine 42 not found");
    }
}
