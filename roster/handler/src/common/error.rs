//! Top-level error type for the Roster API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use warp::http::StatusCode;
use warp::{reject::Reject, reply::Reply};

/// Errors from the internal API logic.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The `limit` query parameter is not an integer.
    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    /// The `offset` query parameter is not a non-negative integer.
    #[error("invalid offset: {0}")]
    InvalidOffset(String),

    /// The `snapshot` query parameter is not an RFC 3339 timestamp.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// The `cursor` query parameter could not be decoded, or it cannot be
    /// used against the requested collection.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    /// The requested sort field is not in the collection's whitelist.
    #[error("invalid sort field for {collection}: {field}")]
    InvalidSortField {
        /// Collection the request was made against.
        collection: &'static str,
        /// The rejected field name.
        field: String,
    },

    /// The sort direction is neither `asc` nor `desc`.
    #[error("invalid sort direction: {0}")]
    InvalidSortDirection(String),

    /// The sort spec is not allowed in the resolved paging mode.
    #[error("sort {sort} is not allowed in {mode} mode")]
    IncompatibleSort {
        /// Wire name of the resolved mode.
        mode: &'static str,
        /// The rejected sort spec.
        sort: String,
    },

    /// The query string could not be deserialized at all.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// Resource not found.
    #[error("Resource not found")]
    NotFound,

    /// The route exists but not for the request method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request deadline elapsed before the backing store answered.
    #[error("Request timeout")]
    RequestTimeout,

    /// The backing store failed to execute a query.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Internal error
    #[error("Internal server error")]
    InternalServer,
}

/// Error implementation.
impl Error {
    /// Provides the status code that corresponds to the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidLimit(_)
            | Error::InvalidOffset(_)
            | Error::InvalidSnapshot(_)
            | Error::InvalidCursor(_)
            | Error::InvalidSortField { .. }
            | Error::InvalidSortDirection(_)
            | Error::IncompatibleSort { .. }
            | Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            Error::Storage(_) | Error::Config(_) | Error::InternalServer => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Provides the machine readable code that corresponds to the error.
    pub fn error_code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "E_INVALID_PARAM",
            StatusCode::NOT_FOUND => "E_NOT_FOUND",
            StatusCode::METHOD_NOT_ALLOWED => "E_METHOD_NOT_ALLOWED",
            StatusCode::REQUEST_TIMEOUT => "E_TIMEOUT",
            _ => "E_INTERNAL",
        }
    }

    /// Provides the error message that corresponds to the error.
    pub fn error_message(&self) -> String {
        match self {
            Error::InvalidLimit(_) => "invalid limit".to_string(),
            Error::InvalidOffset(_) => "invalid offset".to_string(),
            Error::InvalidSnapshot(_) => "invalid snapshot".to_string(),
            Error::InvalidCursor(_) => "invalid cursor".to_string(),
            Error::InvalidSortField { .. } => "invalid sort field".to_string(),
            Error::InvalidSortDirection(_) => "invalid sort direction".to_string(),
            Error::IncompatibleSort { mode, .. } => format!("sort not allowed in {mode} mode"),
            Error::InvalidQuery(_) => "invalid query string".to_string(),
            Error::NotFound => "Resource not found".to_string(),
            Error::MethodNotAllowed => "Method not allowed".to_string(),
            Error::RequestTimeout => "Request timeout".to_string(),
            // Storage and configuration details stay in the logs.
            Error::Storage(_) | Error::Config(_) | Error::InternalServer => {
                "Internal server error".to_string()
            }
        }
    }

    /// The offending raw value for client errors.
    pub fn details(&self) -> Option<String> {
        match self {
            Error::InvalidLimit(raw)
            | Error::InvalidOffset(raw)
            | Error::InvalidSnapshot(raw)
            | Error::InvalidCursor(raw)
            | Error::InvalidSortDirection(raw)
            | Error::InvalidQuery(raw) => Some(raw.clone()),
            Error::InvalidSortField { field, .. } => Some(field.clone()),
            Error::IncompatibleSort { sort, .. } => Some(sort.clone()),
            _ => None,
        }
    }
}

/// Structure representing an error response
/// This is used to serialize error messages in HTTP responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine readable error code.
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// The offending raw value, if any.
    pub details: Option<String>,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        ErrorResponse {
            code: err.error_code().to_string(),
            message: err.error_message(),
            details: err.details(),
        }
    }
}

/// Implement reject for error.
impl Reject for Error {}

/// Implement reply for internal error representation so that the error can be
/// provided directly from Warp as a reply.
impl Reply for Error {
    /// Convert self into a warp response.
    fn into_response(self) -> warp::reply::Response {
        warp::reply::with_status(
            warp::reply::json(&ErrorResponse::from(&self)),
            self.status_code(),
        )
        .into_response()
    }
}
