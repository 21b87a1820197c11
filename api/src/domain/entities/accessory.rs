//! Accessory entity
//!
//! Items that may arrive together with a unit (power supply, cables, keys).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validation::deserialize_present;

entity_id!(
    /// Unique identifier for an accessory
    AccessoryId
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
    pub id: AccessoryId,
    pub name: String,
    pub responsible_user: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccessory {
    pub name: String,
    pub responsible_user: String,
}

/// Request body; the name travels under the `accessories` key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInput {
    #[serde(rename = "accessories")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}
