//! Unified API error handling.
//!
//! Every failure is returned as `{"detail": ...}`. The detail is a plain
//! message for not-found and server errors, and a list of field errors for
//! validation failures.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_path_to_error::Segment;

use crate::db::StoreError;

lazy_static! {
    static ref MISSING_FIELD_REGEX: Regex = Regex::new(r"^missing field `([^`]+)`").unwrap();
}

/// Longest message text returned for server-side failures
const MAX_DETAIL_LEN: usize = 200;

/// Error codes for API responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    InternalError,
    DatabaseError,
}

impl ErrorCode {
    /// Get the default HTTP status code for this error code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "not_found",
            ErrorCode::ValidationError => "validation_error",
            ErrorCode::InternalError => "internal_error",
            ErrorCode::DatabaseError => "database_error",
        }
    }
}

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path to the offending value, e.g. `["body", "guests"]`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn body(field: &str, kind: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut loc = vec!["body".to_string()];
        if !field.is_empty() {
            loc.push(field.to_string());
        }
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// The full error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    status: StatusCode,
    detail: ErrorDetail,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: code.status_code(),
            code,
            detail: ErrorDetail::Message(message.into()),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &ErrorDetail {
        &self.detail
    }

    /// Not found error (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Validation error (422) with field-level details
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            status: ErrorCode::ValidationError.status_code(),
            detail: ErrorDetail::Fields(errors),
        }
    }

    /// Internal server error (500); the message is truncated
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, truncate(&message.into(), MAX_DETAIL_LEN))
    }

    /// Database error (500); the message is truncated
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, truncate(&message.into(), MAX_DETAIL_LEN))
    }
}

/// Cut `text` to at most `max` characters
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            ErrorDetail::Message(message) => write!(f, "[{}] {}", self.code.as_str(), message),
            ErrorDetail::Fields(errors) => {
                write!(f, "[{}] {} invalid field(s)", self.code.as_str(), errors.len())
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store error: {}", err);

        match err {
            StoreError::NotConfigured => ApiError::internal(err.to_string()),
            _ => ApiError::database(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "value_error",
            _ => "json_invalid",
        };
        ApiError::validation(vec![FieldError::body("", kind, rejection.body_text())])
    }
}

/// A body that is valid JSON but does not match the payload type.
/// The failing field path becomes the `loc`.
impl From<serde_path_to_error::Error<serde_json::Error>> for ApiError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let mut loc = vec!["body".to_string()];
        for segment in err.path().iter() {
            match segment {
                Segment::Seq { index } => loc.push(index.to_string()),
                Segment::Map { key } => loc.push(key.clone()),
                Segment::Enum { variant } => loc.push(variant.clone()),
                Segment::Unknown => {}
            }
        }

        let message = err.inner().to_string();
        let missing = MISSING_FIELD_REGEX
            .captures(&message)
            .and_then(|caps| caps.get(1))
            .map(|field| field.as_str().to_string());

        let error = match missing {
            Some(field) => {
                loc.push(field);
                FieldError {
                    loc,
                    msg: "Field required".to_string(),
                    kind: "missing".to_string(),
                }
            }
            None => FieldError {
                loc,
                msg: message,
                kind: "value_error".to_string(),
            },
        };
        ApiError::validation(vec![error])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(vec![FieldError {
            loc: vec!["query".to_string()],
            msg: rejection.body_text(),
            kind: "value_error".to_string(),
        }])
    }
}

/// Builder for collecting multiple validation errors
#[derive(Debug, Default)]
pub struct ValidationErrorBuilder {
    errors: Vec<FieldError>,
}

impl ValidationErrorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation error for a body field
    pub fn add(&mut self, field: &str, kind: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError::body(field, kind, message));
        self
    }

    /// Record the outcome of a field check
    pub fn check(&mut self, field: &str, result: Result<(), (&'static str, String)>) -> &mut Self {
        if let Err((kind, message)) = result {
            self.add(field, kind, message);
        }
        self
    }

    pub fn build(self) -> Option<ApiError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(ApiError::validation(self.errors))
        }
    }

    /// Return Ok(()) if no errors, or Err(ApiError) if there are errors
    pub fn finish(self) -> Result<(), ApiError> {
        match self.build() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
