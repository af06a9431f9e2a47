use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::infra::app_state::AppState;
use crate::infra::errors::AppResult;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "emailOrWhatsapp")]
    pub email_or_whatsapp: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub ok: bool,
    pub id: i64,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    let stored = state
        .contact
        .submit_contact(&body.name, &body.email_or_whatsapp, &body.message)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            ok: true,
            id: stored.id,
        }),
    ))
}
