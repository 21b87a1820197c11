//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

/// Declares a UUID newtype identifier with the usual conversions.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod account;
pub mod accessory;
pub mod analysis;
pub mod company;
pub mod entry_equipment;
pub mod equip;
pub mod equip_catalog;
pub mod page;
pub mod part;

pub use account::{
    AuthenticatedUser, LoginInput, NewSession, NewTypeAccount, NewUser, Resource, Resources,
    Session, TypeAccount, TypeAccountId, TypeAccountInput, User, UserId, UserInput,
};
pub use accessory::{Accessory, AccessoryId, AccessoryInput, NewAccessory};
pub use analysis::{
    Analysis, AnalysisId, AnalysisInput, AnalysisItem, NewAnalysis, NewAnalysisItem,
};
pub use company::{Company, CompanyFilter, CompanyId, CompanyInput, NewCompany};
pub use entry_equipment::{
    DeliveryMethod, EntryEquipment, EntryEquipmentDetail, EntryEquipmentFilter, EntryEquipmentId,
    EntryEquipmentInput, NewEntryEquipment, ProcessStatus,
};
pub use equip::{
    BadgeType, Equip, EquipDetail, EquipFilter, EquipId, EquipInput, EquipPatch, NewEquip,
    ReaderColor,
};
pub use equip_catalog::{
    CatalogInput, EquipKind, EquipMark, EquipMarkId, EquipModel, EquipModelFilter, EquipModelId,
    EquipType, EquipTypeId, MarkInput, ModelInput, NewEquipMark, NewEquipModel,
};
pub use page::{ListQuery, Page, SortField};
pub use part::{NewPart, Part, PartFilter, PartId, PartInput, PriceUpdate};
