//! Equipment catalog entities
//!
//! Equipment is classified in three levels: a fixed set of types, marks
//! (brands) registered under a type, and models registered under a mark.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::deserialize_present;

entity_id!(
    /// Unique identifier for an equipment type row
    EquipTypeId
);
entity_id!(
    /// Unique identifier for a mark
    EquipMarkId
);
entity_id!(
    /// Unique identifier for a model
    EquipModelId
);

/// The kinds of equipment the shop services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipKind {
    #[serde(rename = "catraca")]
    Turnstile,
    #[serde(rename = "relogio")]
    TimeClock,
    #[serde(rename = "controleAcesso")]
    AccessControl,
    /// Loose spare parts; models of this kind may repeat with distinct descriptions
    #[serde(rename = "peca")]
    Part,
    #[serde(rename = "sirene")]
    Siren,
}

impl EquipKind {
    pub const ALL: [EquipKind; 5] = [
        EquipKind::Turnstile,
        EquipKind::TimeClock,
        EquipKind::AccessControl,
        EquipKind::Part,
        EquipKind::Siren,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipKind::Turnstile => "catraca",
            EquipKind::TimeClock => "relogio",
            EquipKind::AccessControl => "controleAcesso",
            EquipKind::Part => "peca",
            EquipKind::Siren => "sirene",
        }
    }
}

impl std::fmt::Display for EquipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EquipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown equipment type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipType {
    pub id: EquipTypeId,
    #[serde(rename = "type")]
    pub kind: EquipKind,
}

/// A brand registered under one equipment type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipMark {
    pub id: EquipMarkId,
    pub mark: String,
    pub equip_type: EquipType,
    pub responsible_user: String,
    pub created_at: DateTime<Utc>,
}

/// A model registered under one mark, carrying its mark and type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipModel {
    pub id: EquipModelId,
    pub model: String,
    pub description: String,
    pub equip_mark: EquipMark,
    pub responsible_user: String,
    pub created_at: DateTime<Utc>,
}

impl EquipModel {
    pub fn kind(&self) -> EquipKind {
        self.equip_mark.equip_type.kind
    }
}

#[derive(Debug, Clone)]
pub struct NewEquipMark {
    pub equip_type_id: EquipTypeId,
    pub mark: String,
    pub responsible_user: String,
}

#[derive(Debug, Clone)]
pub struct NewEquipModel {
    pub equip_mark_id: EquipMarkId,
    pub model: String,
    pub description: String,
    pub responsible_user: String,
}

/// Request body for registering a mark under a type
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mark: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}

/// Request body for registering a model under an existing mark
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInput {
    pub equip_mark_id: Option<Uuid>,
    pub model: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}

/// Request body registering type, mark and model in one call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInput {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mark: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}

/// Listing filters for models (`?type=relogio&mark=Henry`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipModelFilter {
    #[serde(rename = "type")]
    pub kind: Option<EquipKind>,
    pub mark: Option<String>,
    pub model: Option<String>,
}
