//! Health check handler.

use axum::Json;

use crate::dto::response::MessageResponse;

/// GET /health
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "ok".to_string(),
    })
}
