use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use report_core::{ErrorBody, ReportError};

/// Handler-level error: carries a `ReportError` and maps it to an HTTP
/// status with an `ErrorBody` JSON payload.
#[derive(Debug)]
pub struct AppError(pub ReportError);

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            ReportError::InvalidCode => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ReportError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ReportError::Provider(_) | ReportError::Data(_) => {
                tracing::error!("Upstream failure: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch stock data, please retry later".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (ReportError::InvalidCode, StatusCode::BAD_REQUEST),
            (
                ReportError::NotFound("999999".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ReportError::Provider("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ReportError::Data("bad row".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = AppError(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
