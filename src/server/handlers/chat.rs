use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::documents::placeholder_details;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Main chat endpoint: classify the message as a document request or answer
/// it with retrieval-augmented generation.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_message = payload.message.trim().to_string();
    if user_message.is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty.".to_string()));
    }

    let detected = state
        .classifier
        .detect(&user_message, state.filler.registry())
        .await?;

    if let Some(doc_type) = detected {
        return Ok(Json(document_request_response(&state, &doc_type)));
    }

    let rag_answer = state
        .engine
        .answer(&user_message)
        .await
        .map_err(|e| ApiError::Internal(format!("Error processing RAG query: {}", e)))?;

    Ok(Json(json!({
        "type": "rag_response",
        "response": rag_answer.answer,
        "sources": rag_answer.sources,
    })))
}

fn document_request_response(state: &AppState, doc_type: &str) -> serde_json::Value {
    let template_content = match state.filler.load_template(doc_type) {
        Ok(content) => content,
        // Classifier named a template whose file is gone; degrade to a plain
        // text reply instead of failing the chat.
        Err(e) => {
            tracing::warn!("Template for detected intent '{}' unavailable: {}", doc_type, e);
            return json!({
                "type": "text",
                "response": format!(
                    "Sorry, the template file for '{}' could not be found.",
                    doc_type
                ),
            });
        }
    };

    let placeholders = placeholder_details(&template_content);

    json!({
        "type": "document_request",
        "document_type": doc_type,
        "message": format!(
            "Okay, let's fill out your '{}' template. Please provide the following details:",
            doc_type
        ),
        "placeholders_to_fill": placeholders,
    })
}
