use std::fmt::Display;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("Forbidden")]
    Forbidden,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Internal(&'static str),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Logs the underlying failure and hides it behind a per-operation message.
pub fn internal<E: Display>(message: &'static str) -> impl FnOnce(E) -> ApiError {
    move |e| {
        error!("{}: {}", message, e);
        ApiError::Internal(message)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    #[actix_web::test]
    async fn error_body() {
        let test_data = [
            (
                ApiError::BadRequest("Prompt is required".to_owned()),
                400,
                r#"{"error":"Prompt is required"}"#,
            ),
            (
                ApiError::Unauthorized("Unauthorized: No token provided"),
                401,
                r#"{"error":"Unauthorized: No token provided"}"#,
            ),
            (ApiError::Forbidden, 403, r#"{"error":"Forbidden"}"#),
            (
                ApiError::NotFound("User not found"),
                404,
                r#"{"error":"User not found"}"#,
            ),
            (
                internal("Failed to fetch foods")("disk I/O error"),
                500,
                r#"{"error":"Failed to fetch foods"}"#,
            ),
        ];

        for (i, (err, status, body)) in test_data.into_iter().enumerate() {
            let response = err.error_response();
            assert_eq!(response.status().as_u16(), status, "Test case #{}", i);
            let bytes = to_bytes(response.into_body()).await.unwrap();
            assert_eq!(bytes, body.as_bytes(), "Test case #{}", i);
        }
    }
}
