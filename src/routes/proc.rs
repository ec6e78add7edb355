//! Text processing endpoint used by the editor client.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use tracing::instrument;

use crate::editor::EditAction;
use crate::error::AppError;
use crate::middleware::RequestId;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProcRequest {
    pub text: String,
    pub command: String,
}

/// Apply the requested edit to `text` and return the result as a JSON string.
#[instrument(name = "proc::process", skip(state, request_id, body), fields(request_id = %request_id.0, command = %body.command))]
pub async fn process(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<ProcRequest>,
) -> Result<Json<String>, AppError> {
    let action: EditAction = body.command.parse()?;
    let editor = state.editor.as_ref().ok_or(AppError::EditorUnavailable)?;

    let edited = editor.edit(action, &body.text).await?;
    tracing::debug!(chars = edited.len(), "Edit completed");

    Ok(Json(edited))
}
