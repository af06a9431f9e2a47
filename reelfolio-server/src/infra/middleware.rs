use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use super::app_state::AppState;
use super::errors::AppError;

/// Resolve the bearer token to an admin identity and require it to be
/// allowlisted. The identity is stored in request extensions.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request)
        .ok_or_else(|| AppError::unauthorized("Missing bearer token"))?;
    let identity = state
        .auth
        .resolve(&token)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))?;
    if !state.admin.allowlist().allows(&identity.email) {
        debug!(email = %identity.email, "signed-in user is not an admin");
        return Err(AppError::forbidden("Not authorized"));
    }
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn extract_bearer_token(request: &Request) -> Option<String> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
