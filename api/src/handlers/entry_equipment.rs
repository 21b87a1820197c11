//! Repair intake handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Serialize;

use super::{format_date, AppJson};
use crate::auth::{fill_responsible_user, require};
use crate::domain::entities::{
    AuthenticatedUser, DeliveryMethod, EntryEquipmentDetail, EntryEquipmentFilter,
    EntryEquipmentInput, EquipKind, ListQuery, Page, ProcessStatus, Resource,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow {
    pub id: String,
    pub serial_number: String,
    pub razao_social: String,
    #[serde(rename = "type")]
    pub kind: EquipKind,
    pub mark: String,
    pub model: String,
    pub delivery: DeliveryMethod,
    pub defect: String,
    pub status: ProcessStatus,
    pub created_at: String,
}

impl From<EntryEquipmentDetail> for EntryRow {
    fn from(d: EntryEquipmentDetail) -> Self {
        let equip = d.equip;
        Self {
            id: d.entry.id.to_string(),
            serial_number: equip.equip.serial_number,
            razao_social: equip.company.razao_social,
            kind: equip.equip_model.kind(),
            mark: equip.equip_model.equip_mark.mark,
            model: equip.equip_model.model,
            delivery: d.entry.delivery,
            defect: d.entry.defect,
            status: d.entry.status,
            created_at: format_date(&d.entry.created_at),
        }
    }
}

/// POST /entryEquipment
pub async fn add_entry(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<EntryEquipmentInput>,
) -> Result<Json<EntryEquipmentDetail>, AppError> {
    require(&caller, Resource::AddEntry)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let detail = state.entry_service.add(input).await?;
    Ok(Json(detail))
}

/// GET /entryEquipment
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<EntryEquipmentFilter>,
) -> Result<Json<Page<EntryRow>>, AppError> {
    let page = state.entry_service.get_all(&filter, &query).await?;
    Ok(Json(page.map(EntryRow::from)))
}
