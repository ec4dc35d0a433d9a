// HTTP error responses
use crate::error::StatsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

const GENERIC_ERROR: &str = "Failed to fetch stats";

/// Error returned by handlers. Service failures are logged with detail and
/// reach the client only as a generic 500.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    Service(StatsError),
}

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        ApiError::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                tracing::warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Service(err) => {
                tracing::error!("Error fetching stats: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": GENERIC_ERROR })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_maps_to_500() {
        let response = ApiError::from(StatsError::NotImplemented("history")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_maps_to_400() {
        let response = ApiError::BadRequest("Invalid 'from' timestamp").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
