use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input data")]
    InvalidInput,

    #[error("Insufficient quantity")]
    InsufficientQuantity,

    #[error("Stock not found")]
    StockNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput => (StatusCode::BAD_REQUEST, "Invalid input data"),
            AppError::InsufficientQuantity => (StatusCode::BAD_REQUEST, "Insufficient quantity"),
            AppError::StockNotFound => (StatusCode::NOT_FOUND, "Stock not found"),
            AppError::Database(e) => {
                tracing::error!("database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        assert_eq!(
            AppError::InvalidInput.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InsufficientQuantity.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn missing_stock_maps_to_not_found() {
        assert_eq!(
            AppError::StockNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn opaque_errors_map_to_internal_server_error() {
        assert_eq!(
            AppError::Database(sqlx::Error::PoolClosed)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
