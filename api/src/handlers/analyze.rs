//! Technical analysis handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use super::AppJson;
use crate::auth::{fill_responsible_user, require};
use crate::domain::entities::{
    Analysis, AnalysisInput, AuthenticatedUser, EntryEquipmentId, Resource,
};
use crate::error::AppError;
use crate::AppState;

/// POST /analyze
///
/// Record the parts an entry needs; the entry moves on to `orcamento`.
pub async fn add_analysis(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(mut input): AppJson<AnalysisInput>,
) -> Result<Json<Analysis>, AppError> {
    require(&caller, Resource::AddAnalyze)?;
    fill_responsible_user(&mut input.responsible_user, &caller);

    let analysis = state.analysis_service.add(input).await?;
    Ok(Json(analysis))
}

/// GET /analyze/:entry_id
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<Analysis>, AppError> {
    let analysis = state
        .analysis_service
        .get_by_entry(&EntryEquipmentId(entry_id))
        .await?;
    Ok(Json(analysis))
}
