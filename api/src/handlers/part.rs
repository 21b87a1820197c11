//! Spare part handlers

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Serialize;

use super::{format_date, AppJson};
use crate::auth::{fill_responsible_user, require};
use crate::domain::entities::{
    AuthenticatedUser, ListQuery, Page, Part, PartFilter, PartInput, PriceUpdate, Resource,
};
use crate::domain::validation::format_price;
use crate::error::AppError;
use crate::AppState;

/// Part listing line with prices rendered as typed (`"150,00"`)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRow {
    pub id: String,
    pub item: String,
    pub description: String,
    pub cost_price: String,
    pub sale_price: String,
    pub obsolete: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Part> for PartRow {
    fn from(p: Part) -> Self {
        Self {
            id: p.id.to_string(),
            item: p.item,
            description: p.description,
            cost_price: format_price(p.cost_price),
            sale_price: format_price(p.sale_price),
            obsolete: p.obsolete,
            created_at: format_date(&p.created_at),
            updated_at: format_date(&p.updated_at),
        }
    }
}

/// POST /part
pub async fn add_part(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<PartInput>,
) -> Result<Json<Part>, AppError> {
    require(&caller, Resource::AddPart)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let part = state.part_service.add(input).await?;
    Ok(Json(part))
}

/// GET /part
pub async fn list_parts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<PartFilter>,
) -> Result<Json<Page<PartRow>>, AppError> {
    let page = state.part_service.get_all_parts(&filter, &query).await?;
    Ok(Json(page.map(PartRow::from)))
}

/// PUT /part/costPrice
pub async fn update_cost_price(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(update): AppJson<PriceUpdate>,
) -> Result<Json<Part>, AppError> {
    require(&caller, Resource::AddPart)?;

    let part = state.part_service.update_cost_price(update).await?;
    Ok(Json(part))
}

/// PUT /part/salePrice
pub async fn update_sale_price(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(update): AppJson<PriceUpdate>,
) -> Result<Json<Part>, AppError> {
    require(&caller, Resource::AddPart)?;

    let part = state.part_service.update_sale_price(update).await?;
    Ok(Json(part))
}
