use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::infra::app_state::AppState;

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = match &state.postgres {
        None => "disabled",
        Some(pg) => match pg.health_check().await {
            Ok(()) => "ok",
            Err(err) => {
                tracing::warn!(error = %err, "database health check failed");
                "unavailable"
            }
        },
    };
    let status = if database == "unavailable" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ok" } else { "degraded" },
            "database": database,
            "storage": state.urls.base_url().is_some(),
        })),
    )
}
