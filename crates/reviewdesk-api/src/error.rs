use axum::{
    Json,
    extract::rejection::{FormRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reviewdesk_core::CoreError;
use reviewdesk_github::GithubError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// GitHub API error
    Github(GithubError),

    /// Core validation error
    Core(CoreError),

    /// Template rendering error
    Template(minijinja::Error),

    /// Not found (404)
    NotFound(String),

    /// Bad request (400)
    BadRequest(String),

    /// Internal server error
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Github(e) => write!(f, "{}", e),
            ApiError::Core(e) => write!(f, "{}", e),
            ApiError::Template(e) => write!(f, "Template error: {}", e),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::BadRequest(msg) => write!(f, "{}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Core(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Github(_) | ApiError::Template(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Heading for the HTML error page
    pub fn title(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "Pull request not found",
            ApiError::Github(_) => "GitHub connection error",
            ApiError::Core(_) | ApiError::BadRequest(_) => "Invalid request",
            ApiError::Template(_) | ApiError::Internal(_) => "Unexpected error",
        }
    }

    /// User-facing message, used by both the error page and JSON responses
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Template(_) | ApiError::Internal(_) => {
                format!("An unexpected error occurred: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

/// Error response JSON structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_response = ErrorResponse {
            success: false,
            error: self.user_message(),
        };

        (status, Json(error_response)).into_response()
    }
}

// Conversions from domain errors to ApiError
impl From<GithubError> for ApiError {
    fn from(e: GithubError) -> Self {
        ApiError::Github(e)
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Core(e)
    }
}

impl From<minijinja::Error> for ApiError {
    fn from(e: minijinja::Error) -> Self {
        ApiError::Template(e)
    }
}

// A path that does not name a pull request number is a missing page
impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::NotFound(format!("No pull request at this address: {}", e.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(e: FormRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
