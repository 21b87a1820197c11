//! Equipment unit handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::{format_date, AppJson};
use crate::auth::{fill_responsible_user, require};
use crate::domain::entities::{
    AuthenticatedUser, EquipDetail, EquipFilter, EquipId, EquipInput, EquipKind, EquipPatch,
    ListQuery, Page, Resource,
};
use crate::domain::validation::format_cnpj_or_cpf;
use crate::error::AppError;
use crate::AppState;

/// A unit flattened with its company and model chain
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipRow {
    pub id: String,
    pub serial_number: String,
    pub razao_social: String,
    pub cnpj: String,
    #[serde(rename = "type")]
    pub kind: EquipKind,
    pub mark: String,
    pub model: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EquipDetail> for EquipRow {
    fn from(d: EquipDetail) -> Self {
        Self {
            id: d.equip.id.to_string(),
            serial_number: d.equip.serial_number,
            razao_social: d.company.razao_social,
            cnpj: format_cnpj_or_cpf(&d.company.cnpj),
            kind: d.equip_model.kind(),
            mark: d.equip_model.equip_mark.mark,
            model: d.equip_model.model,
            created_at: format_date(&d.equip.created_at),
            updated_at: format_date(&d.equip.updated_at),
        }
    }
}

/// POST /equip
pub async fn add_equip(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<EquipInput>,
) -> Result<Json<EquipDetail>, AppError> {
    require(&caller, Resource::AddEquip)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let detail = state.equip_service.add(input).await?;
    Ok(Json(detail))
}

/// GET /equip
pub async fn list_equips(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<EquipFilter>,
) -> Result<Json<Page<EquipRow>>, AppError> {
    let page = state.equip_service.get_all(&filter, &query).await?;
    Ok(Json(page.map(EquipRow::from)))
}

/// PUT /equip/:id
///
/// Absent fields keep their stored values; `type`, `mark` and `model`
/// are always required.
pub async fn update_equip(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    AppJson(patch): AppJson<EquipPatch>,
) -> Result<Json<EquipDetail>, AppError> {
    require(&caller, Resource::AddEquip)?;

    let detail = state.equip_service.update(&EquipId(id), patch).await?;
    Ok(Json(detail))
}

/// GET /equip/serialNumber/:serial
pub async fn get_equip_by_serial(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Result<Json<EquipDetail>, AppError> {
    let detail = state.equip_service.get_one_by_serial_number(&serial).await?;
    Ok(Json(detail))
}
