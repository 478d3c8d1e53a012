//! HTTP response handling for errors

use super::types::AuthzError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for AuthzError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthzError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthzError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AuthzError::Client(_) => StatusCode::BAD_GATEWAY,
            AuthzError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AuthzError::Unauthorized(_) => ("UNAUTHORIZED", self.to_string()),
            AuthzError::Forbidden { .. } => ("FORBIDDEN", self.reason()),
            AuthzError::Client(_) => ("ACCESS_CLIENT_ERROR", self.to_string()),
            AuthzError::Timeout(_) => ("TIMEOUT", self.to_string()),
            AuthzError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
