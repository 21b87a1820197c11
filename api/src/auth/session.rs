//! Session token authentication middleware

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::domain::entities::{AuthenticatedUser, Resource};
use crate::error::AppError;
use crate::AppState;

/// Extract the session token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware
///
/// Resolves the bearer token to a live session and injects the
/// `AuthenticatedUser` into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .map(str::to_owned)
        .ok_or(AppError::Unauthorized)?;

    let caller = state.account_service.authenticate(&token).await?;

    tracing::debug!(
        username = %caller.user.username,
        type_name = %caller.type_account.type_name,
        "Authenticated request"
    );

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

/// Fail with 403 unless the caller's account type grants `resource`
pub fn require(caller: &AuthenticatedUser, resource: Resource) -> Result<(), AppError> {
    if caller.can(resource) {
        return Ok(());
    }

    tracing::warn!(
        username = %caller.user.username,
        resource = %resource,
        "Missing resource permission"
    );
    Err(AppError::Forbidden)
}

/// Use the caller's username when the body omits `responsibleUser`.
/// An explicit `null` or empty value is left for validation to reject.
pub fn fill_responsible_user(value: &mut Option<Option<String>>, caller: &AuthenticatedUser) {
    if value.is_none() {
        *value = Some(Some(caller.user.username.clone()));
    }
}
