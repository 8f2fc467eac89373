use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::generator::{GenerateError, GenerationFailure};
use crate::providers::ProviderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant converts to a `{"error":{"code","message"}}` body; generation
/// failures additionally carry the diagnostic trace of the failed call.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Settings store error: {0}")]
    Store(String),

    #[error("{0}")]
    Generation(Box<GenerationFailure>),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => {
                error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", &msg)
            }
            AppError::Store(msg) => {
                tracing::error!("Settings store error: {msg}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A settings store error occurred",
                )
            }
            AppError::Generation(failure) => {
                let (status, code) = match &failure.error {
                    GenerateError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
                    GenerateError::MissingApiKey { .. } => {
                        (StatusCode::BAD_REQUEST, "MISSING_API_KEY")
                    }
                    GenerateError::UnsupportedProvider(_) => {
                        (StatusCode::BAD_REQUEST, "UNSUPPORTED_PROVIDER")
                    }
                    GenerateError::Provider(ProviderError::Http { .. }) => {
                        (StatusCode::BAD_GATEWAY, "PROVIDER_HTTP_ERROR")
                    }
                    GenerateError::Provider(ProviderError::MalformedResponse) => {
                        (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE")
                    }
                    GenerateError::Provider(ProviderError::Network(_)) => {
                        (StatusCode::BAD_GATEWAY, "NETWORK_ERROR")
                    }
                };

                let body = Json(json!({
                    "error": {
                        "code": code,
                        "message": failure.error.to_string()
                    },
                    "trace": failure.trace
                }));

                (status, body).into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred",
                )
            }
        }
    }
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = Json(json!({
        "error": {
            "code": code,
            "message": message
        }
    }));

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generator::DiagnosticTrace;

    fn generation_error(error: GenerateError) -> AppError {
        AppError::Generation(Box::new(GenerationFailure {
            error,
            trace: DiagnosticTrace::default(),
        }))
    }

    #[test]
    fn test_input_failures_map_to_400() {
        for error in [
            GenerateError::EmptyInput,
            GenerateError::MissingApiKey {
                provider: "groq".to_string(),
            },
            GenerateError::UnsupportedProvider("openai".to_string()),
        ] {
            let response = generation_error(error).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_upstream_failures_map_to_502() {
        for error in [
            ProviderError::Http {
                status: 429,
                body: String::new(),
            },
            ProviderError::MalformedResponse,
        ] {
            let response = generation_error(GenerateError::Provider(error)).into_response();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let response = AppError::Store("redis down".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
