//! Record-id path parameter extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for 24-character hex record ids in path parameters.
///
/// Parses and validates the id from the path, returning a 400 response
/// if it is not a well-formed object id.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_record(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("Record ID: {}", id)
/// }
/// ```
pub struct ObjectIdPath(pub String);

fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        if is_object_id(&id) {
            Ok(ObjectIdPath(id))
        } else {
            Err(AppError::BadRequest(format!("Invalid ID format: {}", id)).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_24_char_hex() {
        assert!(is_object_id("507f1f77bcf86cd799439011"));
        assert!(is_object_id("AAAAAAAAAAAAAAAAAAAAAAAA"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!is_object_id("507f1f77bcf86cd79943901"));
        assert!(!is_object_id("507f1f77bcf86cd7994390111"));
        assert!(!is_object_id(""));
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!(!is_object_id("507f1f77bcf86cd79943901z"));
        assert!(!is_object_id("not-a-valid-object-id-!!"));
    }
}
