//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{
    Accessory, AccessoryId, BadgeType, Company, CompanyId, DeliveryMethod, EntryEquipment,
    EntryEquipmentId, Equip, EquipId, EquipKind, EquipMark, EquipMarkId, EquipModel,
    EquipModelId, EquipType, EquipTypeId, Part, PartId, ProcessStatus, ReaderColor, Resources,
    TypeAccount, TypeAccountId, User, UserId,
};

/// Create a test company with a valid CNPJ
pub fn test_company() -> Company {
    Company {
        id: CompanyId(Uuid::new_v4()),
        razao_social: "Empresa Teste Ltda".to_string(),
        cnpj: "11222333000181".to_string(),
        street: "Avenida Paulista".to_string(),
        number: "1000".to_string(),
        complement: None,
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        neighborhood: "Bela Vista".to_string(),
        reference_point: None,
        zip_code: "01310100".to_string(),
        telephone: "1133334444".to_string(),
        email: "contato@teste.com.br".to_string(),
        name_contact: "Ana".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Create a mark of the given type
pub fn test_mark(kind: EquipKind, mark: &str) -> EquipMark {
    EquipMark {
        id: EquipMarkId(Uuid::new_v4()),
        mark: mark.to_string(),
        equip_type: EquipType {
            id: EquipTypeId(Uuid::new_v4()),
            kind,
        },
        responsible_user: "modrp".to_string(),
        created_at: Utc::now(),
    }
}

/// Create a model together with a fresh mark and type
pub fn test_model(kind: EquipKind, mark: &str, model: &str) -> EquipModel {
    EquipModel {
        id: EquipModelId(Uuid::new_v4()),
        model: model.to_string(),
        description: String::new(),
        equip_mark: test_mark(kind, mark),
        responsible_user: "modrp".to_string(),
        created_at: Utc::now(),
    }
}

/// Create a unit; point `company_id` and `equip_model_id` at other fixtures as needed
pub fn test_equip() -> Equip {
    Equip {
        id: EquipId(Uuid::new_v4()),
        company_id: CompanyId(Uuid::new_v4()),
        equip_model_id: EquipModelId(Uuid::new_v4()),
        serial_number: "123456789".to_string(),
        reader_color: ReaderColor::White,
        badge_type: BadgeType::Hid,
        details: None,
        proximity: false,
        bio: false,
        barcode: false,
        cartographic: false,
        responsible_user: "modrp".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Create an intake record awaiting analysis
pub fn test_entry() -> EntryEquipment {
    EntryEquipment {
        id: EntryEquipmentId(Uuid::new_v4()),
        equip_id: EquipId(Uuid::new_v4()),
        external_damage: false,
        details: None,
        defect: "Não liga".to_string(),
        delivery: DeliveryMethod::ExternalTechnician,
        client_name: None,
        rg: None,
        cpf: None,
        sender_name: None,
        properly_packed: Some(true),
        zip_code: None,
        state: None,
        city: None,
        neighborhood: None,
        street: None,
        number: None,
        motoboy_name: None,
        responsible_name: None,
        technician_name: Some("Carlos".to_string()),
        accessories: Vec::new(),
        status: ProcessStatus::AwaitingAnalysis,
        responsible_user: "modrp".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_accessory(name: &str) -> Accessory {
    Accessory {
        id: AccessoryId(Uuid::new_v4()),
        name: name.to_string(),
        responsible_user: "modrp".to_string(),
        created_at: Utc::now(),
    }
}

/// Create a part priced at 100,00 cost and 150,00 sale
pub fn test_part(item: &str) -> Part {
    Part {
        id: PartId(Uuid::new_v4()),
        item: item.to_string(),
        description: String::new(),
        cost_price: 10000,
        sale_price: 15000,
        obsolete: false,
        equip_models: Vec::new(),
        responsible_user: "modrp".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Create an account type with every resource granted
pub fn test_type_account(type_name: &str) -> TypeAccount {
    test_type_account_with(type_name, Resources::all())
}

pub fn test_type_account_with(type_name: &str, resources: Resources) -> TypeAccount {
    TypeAccount {
        id: TypeAccountId(Uuid::new_v4()),
        type_name: type_name.to_string(),
        resources,
        responsible_user: "modrp".to_string(),
    }
}

/// Create a user with a placeholder password hash
pub fn test_user_named(username: &str) -> User {
    User {
        id: UserId(Uuid::new_v4()),
        username: username.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        type_account_id: TypeAccountId(Uuid::new_v4()),
        responsible_user: "modrp".to_string(),
        created_at: Utc::now(),
    }
}
