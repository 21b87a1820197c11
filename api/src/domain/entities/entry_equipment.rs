//! Entry equipment entity
//!
//! The intake record created when a unit arrives at the shop. Which contact
//! fields are required depends on how the unit was delivered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::accessory::AccessoryId;
use super::equip::{EquipDetail, EquipId};
use crate::domain::validation::deserialize_present;

entity_id!(
    /// Unique identifier for an intake record
    EntryEquipmentId
);

/// How a unit reached the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMethod {
    /// Brought in by the customer
    #[serde(rename = "Cliente")]
    Client,
    /// Posted through the mail
    Sedex,
    /// Courier on a motorcycle
    Motoboy,
    #[serde(rename = "Técnico externo")]
    ExternalTechnician,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Client => write!(f, "Cliente"),
            DeliveryMethod::Sedex => write!(f, "Sedex"),
            DeliveryMethod::Motoboy => write!(f, "Motoboy"),
            DeliveryMethod::ExternalTechnician => write!(f, "Técnico externo"),
        }
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cliente" => Ok(DeliveryMethod::Client),
            "Sedex" => Ok(DeliveryMethod::Sedex),
            "Motoboy" => Ok(DeliveryMethod::Motoboy),
            "Técnico externo" => Ok(DeliveryMethod::ExternalTechnician),
            _ => Err(format!("Unknown delivery method: {}", s)),
        }
    }
}

/// Where an intake record sits in the repair workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    /// Waiting for a technician to analyze it
    #[serde(rename = "analise")]
    AwaitingAnalysis,
    /// Analysis done, budget waiting for the customer
    #[serde(rename = "orcamento")]
    AwaitingApproval,
    #[serde(rename = "aprovado")]
    Approved,
    #[serde(rename = "reprovado")]
    Rejected,
    #[serde(rename = "reparo")]
    InRepair,
    #[serde(rename = "concluido")]
    Finished,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::AwaitingAnalysis => "analise",
            ProcessStatus::AwaitingApproval => "orcamento",
            ProcessStatus::Approved => "aprovado",
            ProcessStatus::Rejected => "reprovado",
            ProcessStatus::InRepair => "reparo",
            ProcessStatus::Finished => "concluido",
        }
    }

    /// Whether the workflow allows moving from `self` to `next`
    pub fn can_advance_to(&self, next: ProcessStatus) -> bool {
        use ProcessStatus::*;
        matches!(
            (self, next),
            (AwaitingAnalysis, AwaitingApproval)
                | (AwaitingApproval, Approved)
                | (AwaitingApproval, Rejected)
                | (Approved, InRepair)
                | (InRepair, Finished)
                | (Rejected, Finished)
        )
    }
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProcessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analise" => Ok(ProcessStatus::AwaitingAnalysis),
            "orcamento" => Ok(ProcessStatus::AwaitingApproval),
            "aprovado" => Ok(ProcessStatus::Approved),
            "reprovado" => Ok(ProcessStatus::Rejected),
            "reparo" => Ok(ProcessStatus::InRepair),
            "concluido" => Ok(ProcessStatus::Finished),
            _ => Err(format!("Unknown process status: {}", s)),
        }
    }
}

/// An intake record as stored
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEquipment {
    pub id: EntryEquipmentId,
    pub equip_id: EquipId,
    pub external_damage: bool,
    pub details: Option<String>,
    pub defect: String,
    pub delivery: DeliveryMethod,
    pub client_name: Option<String>,
    #[serde(rename = "RG")]
    pub rg: Option<String>,
    #[serde(rename = "Cpf")]
    pub cpf: Option<String>,
    pub sender_name: Option<String>,
    pub properly_packed: Option<bool>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub motoboy_name: Option<String>,
    pub responsible_name: Option<String>,
    pub technician_name: Option<String>,
    pub accessories: Vec<AccessoryId>,
    pub status: ProcessStatus,
    pub responsible_user: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An intake record together with the unit it refers to
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEquipmentDetail {
    #[serde(flatten)]
    pub entry: EntryEquipment,
    pub equip: EquipDetail,
}

#[derive(Debug, Clone, Default)]
pub struct NewEntryEquipment {
    pub equip_id: EquipId,
    pub external_damage: bool,
    pub details: Option<String>,
    pub defect: String,
    pub delivery: Option<DeliveryMethod>,
    pub client_name: Option<String>,
    pub rg: Option<String>,
    pub cpf: Option<String>,
    pub sender_name: Option<String>,
    pub properly_packed: Option<bool>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub motoboy_name: Option<String>,
    pub responsible_name: Option<String>,
    pub technician_name: Option<String>,
    pub accessories: Vec<AccessoryId>,
    pub responsible_user: String,
}

/// Request body for registering an intake; the yes/no answers stay raw JSON
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEquipmentInput {
    pub serial_number: Option<String>,
    pub external_damage: Option<Value>,
    pub details: Option<String>,
    pub defect: Option<String>,
    pub delivery: Option<String>,
    pub client_name: Option<String>,
    #[serde(rename = "RG")]
    pub rg: Option<String>,
    #[serde(rename = "Cpf")]
    pub cpf: Option<String>,
    pub sender_name: Option<String>,
    pub properly_packed: Option<Value>,
    pub zip_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub motoboy_name: Option<String>,
    pub responsible_name: Option<String>,
    pub technician_name: Option<String>,
    pub accessories: Option<Vec<Uuid>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}

/// Listing filters for intake records
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEquipmentFilter {
    pub serial_number: Option<String>,
    pub status: Option<ProcessStatus>,
}
