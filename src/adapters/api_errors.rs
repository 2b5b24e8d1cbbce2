use {
    crate::{config::ErrorStatus, domain::error::WebhookError},
    axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
    },
};

/// A failed delivery paired with the status convention it is reported under.
pub struct ApiError {
    pub error: WebhookError,
    pub status: ErrorStatus,
}

impl ApiError {
    pub fn new(error: WebhookError, status: ErrorStatus) -> Self {
        Self { error, status }
    }
}

// Checked failures go back as their message text; anything unchecked is a
// plain 500 with no detail.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.error.is_checked() {
            tracing::error!(error = %self.error, "webhook processing failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response();
        }

        tracing::warn!(error = %self.error, "webhook rejected");
        (self.status.status_code(), self.error.to_string()).into_response()
    }
}
