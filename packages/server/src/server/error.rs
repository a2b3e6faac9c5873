//! Wire-level error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use extraction::ExtractError;
use serde::Serialize;

/// Error body sent to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
    pub status_code: u16,
}

/// Errors a handler can surface.
#[derive(Debug)]
pub enum ApiError {
    /// 400 - request failed validation.
    Validation(String),
    /// 408 - extraction deadline elapsed.
    Timeout,
    /// 500 - anything else.
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Timeout => "extraction timed out".to_string(),
            Self::Internal(message) => message.clone(),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::InvalidUrl(_) | ExtractError::Security(_) => {
                Self::Validation(e.to_string())
            }
            ExtractError::Timeout { .. } => Self::Timeout,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: true,
            message: self.message(),
            status_code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    let body = ErrorBody {
        error: true,
        message: "not found".to_string(),
        status_code: 404,
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use extraction::SecurityError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_extract_error_mapping() {
        assert!(matches!(
            ApiError::from(ExtractError::InvalidUrl("x".into())),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(ExtractError::Security(SecurityError::BlockedHost(
                "localhost".into()
            ))),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from(ExtractError::Timeout { url: "x".into() }),
            ApiError::Timeout
        ));
        assert!(matches!(
            ApiError::from(ExtractError::Network("x".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            error: true,
            message: "nope".to_string(),
            status_code: 400,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "nope");
        assert_eq!(json["statusCode"], 400);
    }
}
