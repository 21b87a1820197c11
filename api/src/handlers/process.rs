//! Repair workflow handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::AppJson;
use crate::auth::require;
use crate::domain::entities::{
    AuthenticatedUser, EntryEquipment, EntryEquipmentId, ListQuery, Page, ProcessStatus, Resource,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ProcessFilter {
    pub status: Option<ProcessStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdvanceRequest {
    pub status: Option<String>,
}

/// GET /process?status=
pub async fn list_process(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<ProcessFilter>,
) -> Result<Json<Page<EntryEquipment>>, AppError> {
    let page = state.process_service.list(filter.status, &query).await?;
    Ok(Json(page))
}

/// PUT /process/:id
pub async fn advance_process(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    AppJson(request): AppJson<AdvanceRequest>,
) -> Result<Json<EntryEquipment>, AppError> {
    require(&caller, Resource::Tecnico)?;

    let entry = state
        .process_service
        .advance(&EntryEquipmentId(id), request.status.as_deref())
        .await?;
    Ok(Json(entry))
}
