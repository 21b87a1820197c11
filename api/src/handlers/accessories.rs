//! Accessory handlers

use axum::{extract::State, Extension, Json};

use super::AppJson;
use crate::auth::{fill_responsible_user, require};
use crate::domain::entities::{Accessory, AccessoryInput, AuthenticatedUser, Resource};
use crate::error::AppError;
use crate::AppState;

/// POST /accessories
pub async fn add_accessory(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<AccessoryInput>,
) -> Result<Json<Accessory>, AppError> {
    require(&caller, Resource::AddAccessories)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let accessory = state.accessory_service.add(input).await?;
    Ok(Json(accessory))
}

/// GET /accessories
pub async fn list_accessories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Accessory>>, AppError> {
    Ok(Json(state.accessory_service.get_all().await?))
}
