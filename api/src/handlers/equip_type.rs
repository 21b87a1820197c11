//! Equipment catalog handlers (type -> mark -> model)

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::{format_date, AppJson};
use crate::auth::{fill_responsible_user, require};
use crate::domain::entities::{
    AuthenticatedUser, CatalogInput, EquipKind, EquipMark, EquipModel, EquipModelFilter,
    ListQuery, MarkInput, ModelInput, Page, Resource,
};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRow {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EquipKind,
    pub mark: String,
    pub model: String,
    pub description: String,
    pub created_at: String,
}

impl From<EquipModel> for ModelRow {
    fn from(m: EquipModel) -> Self {
        Self {
            id: m.id.to_string(),
            kind: m.kind(),
            mark: m.equip_mark.mark,
            model: m.model,
            description: m.description,
            created_at: format_date(&m.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarkOption {
    pub id: String,
    pub mark: String,
}

#[derive(Debug, Serialize)]
pub struct ModelOption {
    pub id: String,
    pub model: String,
}

/// `?type=catraca&mark=Henry`
#[derive(Debug, Default, Deserialize)]
pub struct CatalogLookup {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mark: Option<String>,
}

/// POST /equip/equipType
///
/// Register a model by naming its type and mark, creating both as needed.
pub async fn add_equip_type(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<CatalogInput>,
) -> Result<Json<EquipModel>, AppError> {
    require(&caller, Resource::AddEquipType)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let model = state.catalog_service.add(input).await?;
    Ok(Json(model))
}

/// GET /equip/equipType
pub async fn list_equip_types(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<EquipModelFilter>,
) -> Result<Json<Page<ModelRow>>, AppError> {
    let page = state.catalog_service.get_all(&filter, &query).await?;
    Ok(Json(page.map(ModelRow::from)))
}

/// POST /equip/equipType/mark
pub async fn add_mark(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<MarkInput>,
) -> Result<Json<EquipMark>, AppError> {
    require(&caller, Resource::AddEquipType)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let mark = state.catalog_service.add_mark(input).await?;
    Ok(Json(mark))
}

/// GET /equip/equipType/mark?type=
pub async fn list_marks_by_type(
    State(state): State<AppState>,
    Query(lookup): Query<CatalogLookup>,
) -> Result<Json<Vec<MarkOption>>, AppError> {
    let marks = state
        .catalog_service
        .get_all_mark_by_type(lookup.kind.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(
        marks
            .into_iter()
            .map(|m| MarkOption {
                id: m.id.to_string(),
                mark: m.mark,
            })
            .collect(),
    ))
}

/// POST /equip/equipType/model
pub async fn add_model(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<ModelInput>,
) -> Result<Json<EquipModel>, AppError> {
    require(&caller, Resource::AddEquipType)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let model = state.catalog_service.add_model(input).await?;
    Ok(Json(model))
}

/// GET /equip/equipType/model?type=&mark=
pub async fn list_models_by_mark(
    State(state): State<AppState>,
    Query(lookup): Query<CatalogLookup>,
) -> Result<Json<Vec<ModelOption>>, AppError> {
    let models = state
        .catalog_service
        .get_all_model_by_mark(
            lookup.kind.as_deref().unwrap_or_default(),
            lookup.mark.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(
        models
            .into_iter()
            .map(|m| ModelOption {
                id: m.id.to_string(),
                model: m.model,
            })
            .collect(),
    ))
}
