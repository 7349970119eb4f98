// Response validation: turns a status code and raw body into either
// "carry on" or a typed error. Runs before any body is decoded.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{HvzError, Result};

#[derive(Deserialize)]
struct ErrorBody {
    errors: Vec<Value>,
}

/// Classify a response. Success statuses pass through untouched.
pub fn check(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    match status {
        StatusCode::BAD_REQUEST => match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Err(HvzError::Validation(
                parsed.errors.into_iter().map(error_text).collect(),
            )),
            Err(err) => {
                warn!(%err, "400 response without an errors list");
                Err(HvzError::Service {
                    status,
                    body: body.to_string(),
                })
            }
        },
        StatusCode::NOT_FOUND => Err(HvzError::NotFound),
        _ => Err(HvzError::Service {
            status,
            body: body.to_string(),
        }),
    }
}

// Strings are shown verbatim, anything else as compact JSON.
fn error_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_passes_through() {
        assert!(check(StatusCode::OK, "{\"anything\": 1}").is_ok());
        assert!(check(StatusCode::CREATED, "").is_ok());
    }

    #[test]
    fn bad_request_collects_errors_verbatim() {
        let err = check(StatusCode::BAD_REQUEST, r#"{"errors": ["bad zombie id"]}"#).unwrap_err();
        match err {
            HvzError::Validation(errors) => assert_eq!(errors, vec!["bad zombie id"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_request_keeps_non_string_entries() {
        let err = check(StatusCode::BAD_REQUEST, r#"{"errors": ["a", 42]}"#).unwrap_err();
        assert_eq!(err.to_string(), "a\n42");
    }

    #[test]
    fn not_found_ignores_body() {
        let err = check(StatusCode::NOT_FOUND, r#"{"errors": ["whatever"]}"#).unwrap_err();
        assert!(matches!(err, HvzError::NotFound));
        assert_eq!(err.to_string(), "404 Not Found!");
    }

    #[test]
    fn other_failures_are_service_errors() {
        let err = check(StatusCode::INTERNAL_SERVER_ERROR, "boom").unwrap_err();
        match err {
            HvzError::Service { status, body } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_bad_request_is_service_error() {
        let err = check(StatusCode::BAD_REQUEST, "not json").unwrap_err();
        assert!(matches!(err, HvzError::Service { .. }));
    }
}
