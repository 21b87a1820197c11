//! Company handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Serialize;

use super::{format_date, AppJson};
use crate::auth::require;
use crate::domain::entities::{
    AuthenticatedUser, Company, CompanyFilter, CompanyInput, ListQuery, Page, Resource,
};
use crate::domain::validation::{format_cnpj_or_cpf, format_phone};
use crate::error::AppError;
use crate::AppState;

/// One line of the company listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub id: String,
    pub cnpj: String,
    pub razao_social: String,
    pub name_contact: String,
    #[serde(rename = "telphone")]
    pub telephone: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Company> for CompanyRow {
    fn from(c: Company) -> Self {
        Self {
            id: c.id.to_string(),
            cnpj: format_cnpj_or_cpf(&c.cnpj),
            razao_social: c.razao_social,
            name_contact: c.name_contact,
            telephone: format_phone(&c.telephone),
            created_at: format_date(&c.created_at),
            updated_at: format_date(&c.updated_at),
        }
    }
}

/// POST /company
pub async fn add_company(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    AppJson(input): AppJson<CompanyInput>,
) -> Result<Json<Company>, AppError> {
    require(&caller, Resource::AddCompany)?;

    let company = state.company_service.add(input).await?;
    Ok(Json(company))
}

/// GET /company
///
/// Paginated listing, filtered by `razaoSocial` and `cnpj`.
pub async fn list_companies(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
    Query(filter): Query<CompanyFilter>,
) -> Result<Json<Page<CompanyRow>>, AppError> {
    let page = state.company_service.get_all(&filter, &query).await?;
    Ok(Json(page.map(CompanyRow::from)))
}

/// GET /company/:cnpj
pub async fn get_company(
    State(state): State<AppState>,
    Path(cnpj): Path<String>,
) -> Result<Json<Company>, AppError> {
    let company = state.company_service.get_one_by_cnpj(&cnpj).await?;
    Ok(Json(company))
}
