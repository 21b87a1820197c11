//! Equipment unit entity
//!
//! A single physical unit (identified by serial number) owned by a company.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::company::{Company, CompanyId};
use super::equip_catalog::{EquipModel, EquipModelId};
use crate::domain::validation::deserialize_present;

entity_id!(
    /// Unique identifier for an equipment unit
    EquipId
);

/// Badge reader color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReaderColor {
    #[serde(rename = "Branco")]
    White,
    #[serde(rename = "Vermelho")]
    Red,
    #[serde(rename = "Azul")]
    Blue,
    #[serde(rename = "Verde")]
    Green,
    #[serde(rename = "NaoSeAplica")]
    NotApplicable,
}

impl std::fmt::Display for ReaderColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReaderColor::White => write!(f, "Branco"),
            ReaderColor::Red => write!(f, "Vermelho"),
            ReaderColor::Blue => write!(f, "Azul"),
            ReaderColor::Green => write!(f, "Verde"),
            ReaderColor::NotApplicable => write!(f, "NaoSeAplica"),
        }
    }
}

impl std::str::FromStr for ReaderColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Branco" => Ok(ReaderColor::White),
            "Vermelho" => Ok(ReaderColor::Red),
            "Azul" => Ok(ReaderColor::Blue),
            "Verde" => Ok(ReaderColor::Green),
            "NaoSeAplica" => Ok(ReaderColor::NotApplicable),
            _ => Err(format!("Unknown reader color: {}", s)),
        }
    }
}

/// Badge technology read by the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeType {
    Hid,
    Mifare,
    Wiegand,
    Abatrack,
    Sarial,
    #[serde(rename = "NaoSeAplica")]
    NotApplicable,
}

impl std::fmt::Display for BadgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeType::Hid => write!(f, "Hid"),
            BadgeType::Mifare => write!(f, "Mifare"),
            BadgeType::Wiegand => write!(f, "Wiegand"),
            BadgeType::Abatrack => write!(f, "Abatrack"),
            BadgeType::Sarial => write!(f, "Sarial"),
            BadgeType::NotApplicable => write!(f, "NaoSeAplica"),
        }
    }
}

impl std::str::FromStr for BadgeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hid" => Ok(BadgeType::Hid),
            "Mifare" => Ok(BadgeType::Mifare),
            "Wiegand" => Ok(BadgeType::Wiegand),
            "Abatrack" => Ok(BadgeType::Abatrack),
            "Sarial" => Ok(BadgeType::Sarial),
            "NaoSeAplica" => Ok(BadgeType::NotApplicable),
            _ => Err(format!("Unknown badge type: {}", s)),
        }
    }
}

/// An equipment unit as stored
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Equip {
    pub id: EquipId,
    pub company_id: CompanyId,
    pub equip_model_id: EquipModelId,
    pub serial_number: String,
    #[serde(rename = "corLeitor")]
    pub reader_color: ReaderColor,
    #[serde(rename = "tipoCracha")]
    pub badge_type: BadgeType,
    pub details: Option<String>,
    #[serde(rename = "proximidade")]
    pub proximity: bool,
    pub bio: bool,
    #[serde(rename = "barras")]
    pub barcode: bool,
    #[serde(rename = "cartografico")]
    pub cartographic: bool,
    pub responsible_user: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A unit together with its owner and full model classification
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipDetail {
    #[serde(flatten)]
    pub equip: Equip,
    pub company: Company,
    pub equip_model: EquipModel,
}

#[derive(Debug, Clone)]
pub struct NewEquip {
    pub company_id: CompanyId,
    pub equip_model_id: EquipModelId,
    pub serial_number: String,
    pub reader_color: ReaderColor,
    pub badge_type: BadgeType,
    pub details: Option<String>,
    pub proximity: bool,
    pub bio: bool,
    pub barcode: bool,
    pub cartographic: bool,
    pub responsible_user: String,
}

/// Request body for registering a unit
///
/// Ids and flags stay raw JSON so a value of the wrong type becomes a field
/// error instead of a rejected body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipInput {
    pub equip_model_id: Option<Value>,
    pub company_id: Option<Value>,
    pub serial_number: Option<String>,
    #[serde(rename = "corLeitor")]
    pub reader_color: Option<String>,
    #[serde(rename = "tipoCracha")]
    pub badge_type: Option<String>,
    pub details: Option<String>,
    #[serde(rename = "proximidade")]
    pub proximity: Option<Value>,
    pub bio: Option<Value>,
    #[serde(rename = "barras")]
    pub barcode: Option<Value>,
    #[serde(rename = "cartografico")]
    pub cartographic: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub responsible_user: Option<Option<String>>,
}

/// Request body for editing a unit; absent fields keep their stored value.
/// `type`, `mark` and `model` always name the (possibly new) model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipPatch {
    pub serial_number: Option<String>,
    #[serde(rename = "corLeitor")]
    pub reader_color: Option<String>,
    #[serde(rename = "tipoCracha")]
    pub badge_type: Option<String>,
    pub details: Option<String>,
    #[serde(rename = "proximidade")]
    pub proximity: Option<Value>,
    pub bio: Option<Value>,
    #[serde(rename = "barras")]
    pub barcode: Option<Value>,
    #[serde(rename = "cartografico")]
    pub cartographic: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mark: Option<String>,
    pub model: Option<String>,
}

/// Listing filters for units
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipFilter {
    pub serial_number: Option<String>,
    pub cnpj: Option<String>,
    pub razao_social: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<super::equip_catalog::EquipKind>,
    pub mark: Option<String>,
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_color_parses_wire_names() {
        assert_eq!("Branco".parse::<ReaderColor>().unwrap(), ReaderColor::White);
        assert_eq!(
            "NaoSeAplica".parse::<ReaderColor>().unwrap(),
            ReaderColor::NotApplicable
        );
        assert!("Amarelo".parse::<ReaderColor>().is_err());
        assert_eq!(ReaderColor::Green.to_string(), "Verde");
    }

    #[test]
    fn badge_type_parses_wire_names() {
        assert_eq!("Mifare".parse::<BadgeType>().unwrap(), BadgeType::Mifare);
        assert!("mifare".parse::<BadgeType>().is_err());
        assert_eq!(BadgeType::NotApplicable.to_string(), "NaoSeAplica");
    }

    #[test]
    fn input_uses_portuguese_keys() {
        let input: EquipInput = serde_json::from_str(
            r#"{"serialNumber": "987654321", "corLeitor": "Azul", "proximidade": true, "barras": false}"#,
        )
        .unwrap();
        assert_eq!(input.serial_number.as_deref(), Some("987654321"));
        assert_eq!(input.reader_color.as_deref(), Some("Azul"));
        assert_eq!(input.proximity, Some(Value::Bool(true)));
        assert_eq!(input.barcode, Some(Value::Bool(false)));
        assert_eq!(input.bio, None);
    }

    #[test]
    fn wrongly_typed_flags_still_deserialize() {
        let input: EquipInput =
            serde_json::from_str(r#"{"proximidade": "sim", "companyId": 12}"#).unwrap();
        assert_eq!(input.proximity, Some(Value::from("sim")));
        assert_eq!(input.company_id, Some(Value::from(12)));
    }
}
