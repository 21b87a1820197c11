//! Technical analysis of an intake record
//!
//! The budget handed to the customer: the parts needed, priced at the sale
//! price in effect when the analysis was written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry_equipment::EntryEquipmentId;
use super::part::PartId;
use crate::domain::validation::deserialize_present;

entity_id!(
    /// Unique identifier for an analysis
    AnalysisId
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisItem {
    pub part_id: PartId,
    pub item: String,
    pub quantity: i32,
    /// Cents
    pub unit_price: i64,
}

impl AnalysisItem {
    pub fn subtotal(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: AnalysisId,
    pub entry_equipment_id: EntryEquipmentId,
    pub observations: String,
    /// Cents
    pub total_price: i64,
    pub items: Vec<AnalysisItem>,
    pub responsible_user: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnalysisItem {
    pub part_id: PartId,
    pub item: String,
    pub quantity: i32,
    pub unit_price: i64,
}

#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub entry_equipment_id: EntryEquipmentId,
    pub observations: String,
    pub total_price: i64,
    pub items: Vec<NewAnalysisItem>,
    pub responsible_user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPartInput {
    pub part_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    pub entry_equipment_id: Option<Uuid>,
    pub observations: Option<String>,
    pub parts: Option<Vec<AnalysisPartInput>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}
