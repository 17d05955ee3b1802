//! Unified error handling for the dashboard.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Writing an uploaded image to disk failed.
    #[error("Image storage error: {0}")]
    ImageStorage(#[from] std::io::Error),

    /// Session store failure.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        // A failed lookup is the caller's 404, not a server fault.
        match err {
            RepositoryError::NotFound => Self::NotFound("record does not exist".to_owned()),
            other => Self::Database(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Database(_) | Self::ImageStorage(_) | Self::Session(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::ImageStorage(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::ImageStorage(_) | Self::Session(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("customer 123".to_string());
        assert_eq!(err.to_string(), "Not found: customer 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        let err = AppError::from(RepositoryError::NotFound);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = AppError::Database(RepositoryError::Database(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
