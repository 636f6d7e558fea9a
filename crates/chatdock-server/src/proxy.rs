//! The chat proxy route.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use chatdock_llm::CompletionClient;

/// Fixed assistant-turn marker appended to the browser message to form the
/// completion prompt.
const ASSISTANT_MARKER: &str = "\n\nAssistant:";

/// Shared proxy state: the completion client, injected at construction.
///
/// Immutable and cloned per request; overlapping requests share nothing
/// mutable.
#[derive(Clone)]
pub struct ProxyState {
    pub client: Arc<dyn CompletionClient>,
}

/// Request body from the widget.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Success body returned to the widget.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Error body returned when no completion was produced.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handle `POST /chatbot`: forward the message to the completion API and
/// return its text. Upstream failure becomes a 502 with an error payload;
/// the server keeps serving.
pub async fn chat_handler(
    State(state): State<ProxyState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let prompt = format!("{}{}", request.message, ASSISTANT_MARKER);

    match state.client.complete(&prompt).await {
        Ok(text) => (StatusCode::OK, Json(ChatResponse { response: text })).into_response(),
        Err(e) => {
            tracing::error!("Completion call failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
