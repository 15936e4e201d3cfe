use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product with SKU '{0}' already exists")]
    DuplicateSku(String),

    #[error("SKU cannot be updated")]
    SkuImmutable,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses.
///
/// Wire messages follow the public API contract; richer detail stays in the
/// Display impl for logs.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::DuplicateSku(_) => AppError::Conflict("SKU already exists".to_string()),
            ProductError::SkuImmutable => {
                AppError::BadRequest("SKU cannot be updated".to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                ProductError::NotFound("abc".to_string()).into_response(),
                StatusCode::NOT_FOUND,
            ),
            (
                ProductError::DuplicateSku("X-1".to_string()).into_response(),
                StatusCode::CONFLICT,
            ),
            (
                ProductError::SkuImmutable.into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::Validation("bad".to_string()).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProductError::Database("down".to_string()).into_response(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }
}
