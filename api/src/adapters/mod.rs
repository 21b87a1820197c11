//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod viacep;

pub use postgres::{
    ensure_schema, PostgresAccessoryRepository, PostgresAnalysisRepository,
    PostgresCompanyRepository, PostgresEntryEquipmentRepository, PostgresEquipCatalogRepository,
    PostgresEquipRepository, PostgresPartRepository, PostgresSessionRepository,
    PostgresTypeAccountRepository, PostgresUserRepository,
};
pub use viacep::ViaCepClient;
