//! Company domain entity
//!
//! A customer that owns equipment sent in for repair. Identified by its
//! legal name (razão social) and a CNPJ, or a CPF for individuals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Unique identifier for a company
    CompanyId
);

/// A registered customer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub razao_social: String,
    /// CNPJ or CPF, digits only
    pub cnpj: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub neighborhood: String,
    pub reference_point: Option<String>,
    /// CEP, digits only
    pub zip_code: String,
    /// Digits only
    #[serde(rename = "telphone")]
    pub telephone: String,
    pub email: String,
    pub name_contact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw request body for registering a company; every field is checked by the service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub razao_social: Option<String>,
    pub cnpj: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub neighborhood: Option<String>,
    pub reference_point: Option<String>,
    pub zip_code: Option<String>,
    #[serde(rename = "telphone")]
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub name_contact: Option<String>,
}

/// Validated data needed to create a company
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub razao_social: String,
    pub cnpj: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
    pub neighborhood: String,
    pub reference_point: Option<String>,
    pub zip_code: String,
    pub telephone: String,
    pub email: String,
    pub name_contact: String,
}

/// Listing filters (`?razaoSocial=acme&cnpj=1122`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Case-insensitive substring
    pub razao_social: Option<String>,
    /// Prefix of the digits-only document
    pub cnpj: Option<String>,
}
