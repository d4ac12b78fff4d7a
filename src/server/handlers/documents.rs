use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateDocumentRequest {
    pub template_key: String,
    pub filled_data: BTreeMap<String, String>,
}

/// Generate the final document once every placeholder value is collected.
pub async fn generate_document(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let doc = state
        .filler
        .generate(&payload.template_key, payload.filled_data)?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("Document '{}' generated and saved.", doc.filename),
        "generated_document_preview": doc.content,
    })))
}
