//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;
pub mod zip_lookup;

pub use repositories::{
    AccessoryRepository, AnalysisRepository, CompanyRepository, EntryEquipmentRepository,
    EquipCatalogRepository, EquipRepository, PartRepository, SessionRepository,
    TypeAccountRepository, UserRepository,
};
pub use zip_lookup::{ZipAddress, ZipCodeLookup};
