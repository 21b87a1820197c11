//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services validate requests field by field and coordinate the repository ports.

pub mod account_service;
pub mod accessory_service;
pub mod analysis_service;
pub mod company_service;
pub mod entry_equipment_service;
pub mod equip_catalog_service;
pub mod equip_service;
pub mod part_service;
pub mod process_service;
pub mod responsible_user;

pub use account_service::{AccountService, LoginSession};
pub use accessory_service::AccessoryService;
pub use analysis_service::AnalysisService;
pub use company_service::CompanyService;
pub use entry_equipment_service::{EntryEquipmentService, EntryRepos};
pub use equip_catalog_service::EquipCatalogService;
pub use equip_service::EquipService;
pub use part_service::PartService;
pub use process_service::ProcessService;
