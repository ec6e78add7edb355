use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::editor::EditError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid action type: {0}")]
    InvalidAction(String),

    #[error("Text editor is not configured")]
    EditorUnavailable,

    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidAction(_) => StatusCode::BAD_REQUEST,
            AppError::EditorUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::InvalidAction(command) => AppError::InvalidAction(command),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Upstream(_) = &self {
            tracing::warn!(error = %self, "Text editor request failed");
        }
        let message = self.to_string();

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
