use crate::error::SeasonalError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::warn;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// A [`SeasonalError`] rendered as `{"error": "..."}` with a matching status code.
#[derive(Debug)]
pub struct ApiError(pub SeasonalError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SeasonalError::InvalidDateFormat(_)
            | SeasonalError::NoValidParameters
            | SeasonalError::InvalidLocation { .. }
            | SeasonalError::InvalidYearRange { .. } => StatusCode::BAD_REQUEST,
            SeasonalError::NoSeasonalData { .. } => StatusCode::NOT_FOUND,
            SeasonalError::DataUnavailable(_) => StatusCode::BAD_GATEWAY,
            SeasonalError::Config(_) | SeasonalError::ClientSetup(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<SeasonalError> for ApiError {
    fn from(error: SeasonalError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Request failed with {}: {}", status, self.0);
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
