use axum::Json;

use crate::api::types::StatusBody;

pub async fn handle_root() -> Json<StatusBody> {
    Json(StatusBody {
        status: "ok".to_string(),
        message: "LLM Evaluation Platform API is running".to_string(),
    })
}
