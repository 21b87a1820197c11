//! Account handlers
//!
//! Login/logout, account types and users.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::AppJson;
use crate::app::LoginSession;
use crate::auth::{bearer_token, fill_responsible_user, require};
use crate::domain::entities::{
    AuthenticatedUser, ListQuery, LoginInput, Page, Resource, Resources, TypeAccount,
    TypeAccountInput, User, UserInput,
};
use crate::error::AppError;
use crate::AppState;

/// Flags of one account type, flattened next to its name
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAccountResources {
    pub type_name: String,
    #[serde(flatten)]
    pub resources: Resources,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogoutQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub logout: bool,
}

/// POST /login
///
/// Every failure is a bare 401 so callers cannot probe usernames.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginInput>,
) -> Result<Json<LoginSession>, AppError> {
    let username = input.username.clone().unwrap_or_default();

    let session = state.account_service.login(input).await.map_err(|e| {
        tracing::warn!(username = %username, error = %e, "Login rejected");
        AppError::Unauthorized
    })?;

    Ok(Json(session))
}

/// POST /logout
///
/// The token comes from `?token=` or the Authorization header.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LogoutQuery>,
) -> Result<Json<LogoutResponse>, AppError> {
    let token = query
        .token
        .as_deref()
        .or_else(|| bearer_token(&headers))
        .ok_or(AppError::Unauthorized)?;

    state.account_service.logout(token).await?;
    Ok(Json(LogoutResponse { logout: true }))
}

/// POST /typeAccount
pub async fn add_type_account(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<TypeAccountInput>,
) -> Result<Json<TypeAccount>, AppError> {
    require(&caller, Resource::AddTypeAccount)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let account = state.account_service.add_type_account(input).await?;
    Ok(Json(account))
}

/// GET /typeAccount
pub async fn list_type_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<TypeAccount>>, AppError> {
    Ok(Json(state.account_service.get_all_type_accounts(&query).await?))
}

/// GET /typeAccount/:type_name
pub async fn get_type_account_resources(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
) -> Result<Json<TypeAccountResources>, AppError> {
    let account = state
        .account_service
        .get_resources_by_type_account(&type_name)
        .await?;

    Ok(Json(TypeAccountResources {
        type_name: account.type_name,
        resources: account.resources,
    }))
}

/// POST /user
pub async fn add_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<UserInput>,
) -> Result<Json<User>, AppError> {
    require(&caller, Resource::AddUser)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let user = state.account_service.add_user(input).await?;
    Ok(Json(user))
}
