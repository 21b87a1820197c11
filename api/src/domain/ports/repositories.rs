//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).
//!
//! List operations return the requested page together with the total number
//! of matching rows.

use async_trait::async_trait;

use crate::domain::entities::{
    Accessory, AccessoryId, Analysis, Company, CompanyFilter, CompanyId, EntryEquipment,
    EntryEquipmentFilter, EntryEquipmentId, Equip, EquipFilter, EquipId, EquipKind, EquipMark,
    EquipMarkId, EquipModel, EquipModelFilter, EquipModelId, EquipType, ListQuery, NewAccessory,
    NewAnalysis, NewCompany, NewEntryEquipment, NewEquip, NewEquipMark, NewEquipModel, NewPart,
    NewSession, NewTypeAccount, NewUser, Part, PartFilter, PartId, ProcessStatus, Session,
    TypeAccount, TypeAccountId, User, UserId,
};
use crate::error::DomainError;

/// Repository for Company entities
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError>;

    /// Find a company by its digits-only CNPJ/CPF
    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Company>, DomainError>;

    async fn find_by_razao_social(&self, razao_social: &str)
        -> Result<Option<Company>, DomainError>;

    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError>;

    async fn list(
        &self,
        filter: &CompanyFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Company>, u64), DomainError>;
}

/// Repository for the type -> mark -> model classification
#[async_trait]
pub trait EquipCatalogRepository: Send + Sync {
    async fn find_type(&self, kind: EquipKind) -> Result<Option<EquipType>, DomainError>;

    /// Return the row for `kind`, inserting it on first use
    async fn find_or_create_type(&self, kind: EquipKind) -> Result<EquipType, DomainError>;

    async fn find_mark_by_id(&self, id: &EquipMarkId) -> Result<Option<EquipMark>, DomainError>;

    /// Find a mark by name under one type
    async fn find_mark(&self, kind: EquipKind, mark: &str)
        -> Result<Option<EquipMark>, DomainError>;

    async fn create_mark(&self, mark: &NewEquipMark) -> Result<EquipMark, DomainError>;

    async fn find_model_by_id(&self, id: &EquipModelId)
        -> Result<Option<EquipModel>, DomainError>;

    /// Models with this exact name under one mark
    async fn find_models_by_name(
        &self,
        mark_id: &EquipMarkId,
        model: &str,
    ) -> Result<Vec<EquipModel>, DomainError>;

    async fn create_model(&self, model: &NewEquipModel) -> Result<EquipModel, DomainError>;

    async fn list_models(
        &self,
        filter: &EquipModelFilter,
        query: &ListQuery,
    ) -> Result<(Vec<EquipModel>, u64), DomainError>;

    async fn list_marks_by_type(&self, kind: EquipKind) -> Result<Vec<EquipMark>, DomainError>;

    async fn list_models_by_mark(
        &self,
        kind: EquipKind,
        mark: &str,
    ) -> Result<Vec<EquipModel>, DomainError>;
}

/// Repository for equipment units
#[async_trait]
pub trait EquipRepository: Send + Sync {
    async fn find_by_id(&self, id: &EquipId) -> Result<Option<Equip>, DomainError>;

    async fn find_by_serial_number(&self, serial: &str) -> Result<Option<Equip>, DomainError>;

    async fn create(&self, equip: &NewEquip) -> Result<Equip, DomainError>;

    /// Persist every mutable column of an existing unit
    async fn update(&self, equip: &Equip) -> Result<Equip, DomainError>;

    async fn list(
        &self,
        filter: &EquipFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Equip>, u64), DomainError>;
}

/// Repository for intake records
#[async_trait]
pub trait EntryEquipmentRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntryEquipmentId)
        -> Result<Option<EntryEquipment>, DomainError>;

    /// Insert the record and its accessory links together
    async fn create(&self, entry: &NewEntryEquipment) -> Result<EntryEquipment, DomainError>;

    async fn update_status(
        &self,
        id: &EntryEquipmentId,
        status: ProcessStatus,
    ) -> Result<EntryEquipment, DomainError>;

    async fn list(
        &self,
        filter: &EntryEquipmentFilter,
        query: &ListQuery,
    ) -> Result<(Vec<EntryEquipment>, u64), DomainError>;
}

/// Repository for accessories
#[async_trait]
pub trait AccessoryRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Accessory>, DomainError>;

    /// Accessories among `ids` that exist; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[AccessoryId]) -> Result<Vec<Accessory>, DomainError>;

    async fn create(&self, accessory: &NewAccessory) -> Result<Accessory, DomainError>;

    /// Every accessory ordered by name
    async fn list_all(&self) -> Result<Vec<Accessory>, DomainError>;
}

/// Repository for spare parts
#[async_trait]
pub trait PartRepository: Send + Sync {
    async fn find_by_id(&self, id: &PartId) -> Result<Option<Part>, DomainError>;

    async fn find_by_item(&self, item: &str) -> Result<Option<Part>, DomainError>;

    /// Insert the part and its model links together
    async fn create(&self, part: &NewPart) -> Result<Part, DomainError>;

    async fn update_cost_price(&self, id: &PartId, cents: i64) -> Result<Part, DomainError>;

    async fn update_sale_price(&self, id: &PartId, cents: i64) -> Result<Part, DomainError>;

    async fn list(
        &self,
        filter: &PartFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Part>, u64), DomainError>;
}

/// Repository for technical analyses
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Insert the analysis with its items and move the entry to `orcamento`
    async fn create(&self, analysis: &NewAnalysis) -> Result<Analysis, DomainError>;

    async fn find_by_entry(&self, entry_id: &EntryEquipmentId)
        -> Result<Option<Analysis>, DomainError>;
}

/// Repository for account types
#[async_trait]
pub trait TypeAccountRepository: Send + Sync {
    async fn find_by_id(&self, id: &TypeAccountId) -> Result<Option<TypeAccount>, DomainError>;

    async fn find_by_name(&self, type_name: &str) -> Result<Option<TypeAccount>, DomainError>;

    async fn create(&self, account: &NewTypeAccount) -> Result<TypeAccount, DomainError>;

    async fn list(&self, query: &ListQuery) -> Result<(Vec<TypeAccount>, u64), DomainError>;
}

/// Repository for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Repository for login sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &NewSession) -> Result<Session, DomainError>;

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError>;

    /// Remove a session, returning whether one existed
    async fn delete(&self, hash: &str) -> Result<bool, DomainError>;
}
