//! axum integration
//!
//! [`RawQuery`] extracts the request query string with repeated keys kept,
//! and [`FilterRejection`] maps parse, validation, and build failures to JSON
//! error responses.
//!
//! ```ignore
//! async fn list_users(
//!     State(state): State<AppState>,
//!     raw: RawQuery,
//! ) -> Result<Json<Vec<User>>, FilterRejection> {
//!     let input = state.user_filters.parse(&raw)?;
//!     let clause = state.user_filters.where_clause(&input)?;
//!     // hand `clause` to the repository
//! }
//! ```

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::error::{FilterError, ValidationErrors};
use crate::input::RawQuery;

impl<S> FromRequestParts<S> for RawQuery
where
    S: Send + Sync,
{
    type Rejection = FilterRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(FilterRejection::Query)?;
        Ok(RawQuery::from_pairs(pairs))
    }
}

/// Filter failure with structured error response
#[derive(Debug)]
pub enum FilterRejection {
    /// Failed to parse query string
    Query(QueryRejection),
    /// Filter input does not match the schema
    Validation(ValidationErrors),
    /// Predicate construction or declaration failed
    Filter(FilterError),
}

impl From<ValidationErrors> for FilterRejection {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<FilterError> for FilterRejection {
    fn from(error: FilterError) -> Self {
        Self::Filter(error)
    }
}

impl IntoResponse for FilterRejection {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::Query(rejection) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                "QUERY_PARSE_ERROR",
                rejection.body_text(),
            ),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                "VALIDATION_ERROR",
                errors.message(),
            ),
            Self::Filter(error) if error.is_client_error() => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                error.code(),
                error.to_string(),
            ),
            Self::Filter(error) => {
                tracing::error!(error = %error, "Filter declaration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "INTERNAL",
                    "Filter configuration is invalid".to_string(),
                )
            }
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}
