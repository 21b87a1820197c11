//! Spare part entity
//!
//! Prices are kept in cents. Each part lists the models it fits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::equip_catalog::EquipModelId;
use crate::domain::validation::deserialize_present;

entity_id!(
    /// Unique identifier for a part
    PartId
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: PartId,
    pub item: String,
    pub description: String,
    /// Cents
    pub cost_price: i64,
    /// Cents
    pub sale_price: i64,
    pub obsolete: bool,
    pub equip_models: Vec<EquipModelId>,
    pub responsible_user: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPart {
    pub item: String,
    pub description: String,
    pub cost_price: i64,
    pub sale_price: i64,
    pub equip_models: Vec<EquipModelId>,
    pub responsible_user: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquipModelRef {
    pub id: Uuid,
}

/// Request body for registering a part; prices are text such as `"100,00"`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartInput {
    pub item: Option<String>,
    pub description: Option<String>,
    pub cost_price: Option<String>,
    pub sale_price: Option<String>,
    pub equip_models: Option<Vec<EquipModelRef>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}

/// Body of the price update routes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdate {
    pub id: Option<Uuid>,
    pub new_cost_price: Option<String>,
    pub new_sale_price: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartFilter {
    /// Case-insensitive substring
    pub item: Option<String>,
}
