use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coach::CoachError;
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Coach(CoachError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Coach(e) => write!(f, "Coach error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Coach(CoachError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Self::Coach(CoachError::MissingApiKey) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Coach(CoachError::StorageError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Coach(_) => StatusCode::BAD_GATEWAY,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let body = match &self {
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
            Self::Coach(CoachError::ValidationError(msg)) => {
                json!({
                    "error": msg
                })
            }
            Self::Coach(CoachError::MissingApiKey) => {
                json!({
                    "error": "The AI coach is not configured"
                })
            }
            Self::Coach(e) => {
                tracing::error!("Coach error: {:?}", e);
                json!({
                    "error": "The AI coach is unavailable right now"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Missing or invalid X-User-Id header"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<CoachError> for WebError {
    fn from(error: CoachError) -> Self {
        match error {
            CoachError::StorageError(e) => Self::Storage(e),
            other => Self::Coach(other),
        }
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(WebError::from(StorageError::NotFound).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            WebError::from(CoachError::StorageError(StorageError::NotFound)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::from(CoachError::ValidationError("bad".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::from(CoachError::MissingApiKey).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            WebError::from(CoachError::ApiError {
                status: 500,
                message: "upstream".to_string()
            })
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(WebError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }
}
