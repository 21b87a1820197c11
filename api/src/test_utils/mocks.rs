//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! Matching rules follow the PostgreSQL adapters: names compare
//! case-insensitively, documents and serial numbers compare exactly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Accessory, AccessoryId, Analysis, AnalysisId, AnalysisItem, Company, CompanyFilter,
    CompanyId, EntryEquipment, EntryEquipmentFilter, EntryEquipmentId, Equip, EquipFilter,
    EquipId, EquipKind, EquipMark, EquipMarkId, EquipModel, EquipModelFilter, EquipModelId,
    EquipType, EquipTypeId, ListQuery, NewAccessory, NewAnalysis, NewCompany, NewEntryEquipment,
    NewEquip, NewEquipMark, NewEquipModel, NewPart, NewSession, NewTypeAccount, NewUser, Part,
    PartFilter, PartId, ProcessStatus, Session, SortField, TypeAccount, TypeAccountId, User,
    UserId,
};
use crate::domain::ports::{
    AccessoryRepository, AnalysisRepository, CompanyRepository, EntryEquipmentRepository,
    EquipCatalogRepository, EquipRepository, PartRepository, SessionRepository,
    TypeAccountRepository, UserRepository, ZipAddress, ZipCodeLookup,
};
use crate::domain::validation::{only_digits_string, provided};
use crate::error::{DomainError, ZipLookupError};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn equals_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Order by the requested timestamp and cut out the requested page
fn paginate<T>(
    mut rows: Vec<T>,
    query: &ListQuery,
    timestamps: impl Fn(&T) -> (DateTime<Utc>, DateTime<Utc>),
) -> (Vec<T>, u64) {
    let field = query.sort_field();
    rows.sort_by_key(|row| {
        let (created, updated) = timestamps(row);
        match field {
            SortField::CreatedAt => created,
            SortField::UpdatedAt => updated,
        }
    });
    if !query.ascending() {
        rows.reverse();
    }

    let count = rows.len() as u64;
    let page = rows
        .into_iter()
        .skip(query.offset() as usize)
        .take(query.limit() as usize)
        .collect();
    (page, count)
}

// ============================================================================
// In-Memory Company Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCompanyRepository {
    companies: Arc<RwLock<HashMap<CompanyId, Company>>>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a company for testing
    pub fn with_company(self, company: Company) -> Self {
        self.companies.write().unwrap().insert(company.id, company);
        self
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError> {
        Ok(self.companies.read().unwrap().get(id).cloned())
    }

    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Company>, DomainError> {
        let companies = self.companies.read().unwrap();
        Ok(companies.values().find(|c| c.cnpj == cnpj).cloned())
    }

    async fn find_by_razao_social(
        &self,
        razao_social: &str,
    ) -> Result<Option<Company>, DomainError> {
        let companies = self.companies.read().unwrap();
        Ok(companies
            .values()
            .find(|c| equals_ci(&c.razao_social, razao_social))
            .cloned())
    }

    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError> {
        let now = Utc::now();
        let created = Company {
            id: CompanyId::new(),
            razao_social: company.razao_social.clone(),
            cnpj: company.cnpj.clone(),
            street: company.street.clone(),
            number: company.number.clone(),
            complement: company.complement.clone(),
            city: company.city.clone(),
            state: company.state.clone(),
            neighborhood: company.neighborhood.clone(),
            reference_point: company.reference_point.clone(),
            zip_code: company.zip_code.clone(),
            telephone: company.telephone.clone(),
            email: company.email.clone(),
            name_contact: company.name_contact.clone(),
            created_at: now,
            updated_at: now,
        };
        self.companies
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn list(
        &self,
        filter: &CompanyFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Company>, u64), DomainError> {
        let cnpj = provided(&filter.cnpj).map(only_digits_string);
        let rows: Vec<Company> = self
            .companies
            .read()
            .unwrap()
            .values()
            .filter(|c| {
                provided(&filter.razao_social).map_or(true, |n| contains_ci(&c.razao_social, n))
            })
            .filter(|c| cnpj.as_deref().map_or(true, |d| c.cnpj.starts_with(d)))
            .cloned()
            .collect();
        Ok(paginate(rows, query, |c| (c.created_at, c.updated_at)))
    }
}

// ============================================================================
// In-Memory Equipment Catalog Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryEquipCatalogRepository {
    types: Arc<RwLock<HashMap<EquipKind, EquipType>>>,
    marks: Arc<RwLock<HashMap<EquipMarkId, EquipMark>>>,
    models: Arc<RwLock<HashMap<EquipModelId, EquipModel>>>,
}

impl InMemoryEquipCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a mark and its type
    pub fn with_mark(self, mark: EquipMark) -> Self {
        {
            let mut types = self.types.write().unwrap();
            types
                .entry(mark.equip_type.kind)
                .or_insert_with(|| mark.equip_type.clone());
            self.marks.write().unwrap().insert(mark.id, mark);
        }
        self
    }

    /// Pre-populate with a model, registering its mark and type too
    pub fn with_model(self, model: EquipModel) -> Self {
        let this = self.with_mark(model.equip_mark.clone());
        this.models.write().unwrap().insert(model.id, model);
        this
    }
}

#[async_trait]
impl EquipCatalogRepository for InMemoryEquipCatalogRepository {
    async fn find_type(&self, kind: EquipKind) -> Result<Option<EquipType>, DomainError> {
        Ok(self.types.read().unwrap().get(&kind).cloned())
    }

    async fn find_or_create_type(&self, kind: EquipKind) -> Result<EquipType, DomainError> {
        let mut types = self.types.write().unwrap();
        Ok(types
            .entry(kind)
            .or_insert_with(|| EquipType {
                id: EquipTypeId::new(),
                kind,
            })
            .clone())
    }

    async fn find_mark_by_id(&self, id: &EquipMarkId) -> Result<Option<EquipMark>, DomainError> {
        Ok(self.marks.read().unwrap().get(id).cloned())
    }

    async fn find_mark(
        &self,
        kind: EquipKind,
        mark: &str,
    ) -> Result<Option<EquipMark>, DomainError> {
        let marks = self.marks.read().unwrap();
        Ok(marks
            .values()
            .find(|m| m.equip_type.kind == kind && equals_ci(&m.mark, mark))
            .cloned())
    }

    async fn create_mark(&self, mark: &NewEquipMark) -> Result<EquipMark, DomainError> {
        let equip_type = self
            .types
            .read()
            .unwrap()
            .values()
            .find(|t| t.id == mark.equip_type_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("equip type {}", mark.equip_type_id)))?;

        let created = EquipMark {
            id: EquipMarkId::new(),
            mark: mark.mark.clone(),
            equip_type,
            responsible_user: mark.responsible_user.clone(),
            created_at: Utc::now(),
        };
        self.marks
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_model_by_id(
        &self,
        id: &EquipModelId,
    ) -> Result<Option<EquipModel>, DomainError> {
        Ok(self.models.read().unwrap().get(id).cloned())
    }

    async fn find_models_by_name(
        &self,
        mark_id: &EquipMarkId,
        model: &str,
    ) -> Result<Vec<EquipModel>, DomainError> {
        let models = self.models.read().unwrap();
        Ok(models
            .values()
            .filter(|m| m.equip_mark.id == *mark_id && equals_ci(&m.model, model))
            .cloned()
            .collect())
    }

    async fn create_model(&self, model: &NewEquipModel) -> Result<EquipModel, DomainError> {
        let equip_mark = self
            .marks
            .read()
            .unwrap()
            .get(&model.equip_mark_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("equip mark {}", model.equip_mark_id)))?;

        let created = EquipModel {
            id: EquipModelId::new(),
            model: model.model.clone(),
            description: model.description.clone(),
            equip_mark,
            responsible_user: model.responsible_user.clone(),
            created_at: Utc::now(),
        };
        self.models
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_models(
        &self,
        filter: &EquipModelFilter,
        query: &ListQuery,
    ) -> Result<(Vec<EquipModel>, u64), DomainError> {
        let rows: Vec<EquipModel> = self
            .models
            .read()
            .unwrap()
            .values()
            .filter(|m| filter.kind.map_or(true, |k| m.kind() == k))
            .filter(|m| provided(&filter.mark).map_or(true, |s| contains_ci(&m.equip_mark.mark, s)))
            .filter(|m| provided(&filter.model).map_or(true, |s| contains_ci(&m.model, s)))
            .cloned()
            .collect();
        Ok(paginate(rows, query, |m| (m.created_at, m.created_at)))
    }

    async fn list_marks_by_type(&self, kind: EquipKind) -> Result<Vec<EquipMark>, DomainError> {
        let mut marks: Vec<EquipMark> = self
            .marks
            .read()
            .unwrap()
            .values()
            .filter(|m| m.equip_type.kind == kind)
            .cloned()
            .collect();
        marks.sort_by(|a, b| a.mark.cmp(&b.mark));
        Ok(marks)
    }

    async fn list_models_by_mark(
        &self,
        kind: EquipKind,
        mark: &str,
    ) -> Result<Vec<EquipModel>, DomainError> {
        let mut models: Vec<EquipModel> = self
            .models
            .read()
            .unwrap()
            .values()
            .filter(|m| m.kind() == kind && equals_ci(&m.equip_mark.mark, mark))
            .cloned()
            .collect();
        models.sort_by(|a, b| a.model.cmp(&b.model));
        Ok(models)
    }
}

// ============================================================================
// In-Memory Equipment Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryEquipRepository {
    equips: Arc<RwLock<HashMap<EquipId, Equip>>>,
}

impl InMemoryEquipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equip(self, equip: Equip) -> Self {
        self.equips.write().unwrap().insert(equip.id, equip);
        self
    }
}

#[async_trait]
impl EquipRepository for InMemoryEquipRepository {
    async fn find_by_id(&self, id: &EquipId) -> Result<Option<Equip>, DomainError> {
        Ok(self.equips.read().unwrap().get(id).cloned())
    }

    async fn find_by_serial_number(&self, serial: &str) -> Result<Option<Equip>, DomainError> {
        let equips = self.equips.read().unwrap();
        Ok(equips.values().find(|e| e.serial_number == serial).cloned())
    }

    async fn create(&self, equip: &NewEquip) -> Result<Equip, DomainError> {
        let now = Utc::now();
        let created = Equip {
            id: EquipId::new(),
            company_id: equip.company_id,
            equip_model_id: equip.equip_model_id,
            serial_number: equip.serial_number.clone(),
            reader_color: equip.reader_color,
            badge_type: equip.badge_type,
            details: equip.details.clone(),
            proximity: equip.proximity,
            bio: equip.bio,
            barcode: equip.barcode,
            cartographic: equip.cartographic,
            responsible_user: equip.responsible_user.clone(),
            created_at: now,
            updated_at: now,
        };
        self.equips
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, equip: &Equip) -> Result<Equip, DomainError> {
        let mut equips = self.equips.write().unwrap();
        let stored = equips
            .get_mut(&equip.id)
            .ok_or_else(|| DomainError::NotFound(format!("equip {}", equip.id)))?;
        *stored = Equip {
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..equip.clone()
        };
        Ok(stored.clone())
    }

    /// Only the serial number filter is applied; company and catalog
    /// filters need the joined tables
    async fn list(
        &self,
        filter: &EquipFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Equip>, u64), DomainError> {
        let rows: Vec<Equip> = self
            .equips
            .read()
            .unwrap()
            .values()
            .filter(|e| {
                provided(&filter.serial_number).map_or(true, |s| contains_ci(&e.serial_number, s))
            })
            .cloned()
            .collect();
        Ok(paginate(rows, query, |e| (e.created_at, e.updated_at)))
    }
}

// ============================================================================
// In-Memory Entry Equipment Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryEntryEquipmentRepository {
    entries: Arc<RwLock<HashMap<EntryEquipmentId, EntryEquipment>>>,
}

impl InMemoryEntryEquipmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, entry: EntryEquipment) -> Self {
        self.entries.write().unwrap().insert(entry.id, entry);
        self
    }
}

#[async_trait]
impl EntryEquipmentRepository for InMemoryEntryEquipmentRepository {
    async fn find_by_id(
        &self,
        id: &EntryEquipmentId,
    ) -> Result<Option<EntryEquipment>, DomainError> {
        Ok(self.entries.read().unwrap().get(id).cloned())
    }

    async fn create(&self, entry: &NewEntryEquipment) -> Result<EntryEquipment, DomainError> {
        let delivery = entry
            .delivery
            .ok_or_else(|| DomainError::Internal("entry without delivery method".into()))?;
        let now = Utc::now();
        let created = EntryEquipment {
            id: EntryEquipmentId::new(),
            equip_id: entry.equip_id,
            external_damage: entry.external_damage,
            details: entry.details.clone(),
            defect: entry.defect.clone(),
            delivery,
            client_name: entry.client_name.clone(),
            rg: entry.rg.clone(),
            cpf: entry.cpf.clone(),
            sender_name: entry.sender_name.clone(),
            properly_packed: entry.properly_packed,
            zip_code: entry.zip_code.clone(),
            state: entry.state.clone(),
            city: entry.city.clone(),
            neighborhood: entry.neighborhood.clone(),
            street: entry.street.clone(),
            number: entry.number.clone(),
            motoboy_name: entry.motoboy_name.clone(),
            responsible_name: entry.responsible_name.clone(),
            technician_name: entry.technician_name.clone(),
            accessories: entry.accessories.clone(),
            status: ProcessStatus::AwaitingAnalysis,
            responsible_user: entry.responsible_user.clone(),
            created_at: now,
            updated_at: now,
        };
        self.entries
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_status(
        &self,
        id: &EntryEquipmentId,
        status: ProcessStatus,
    ) -> Result<EntryEquipment, DomainError> {
        let mut entries = self.entries.write().unwrap();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("entry {}", id)))?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Filters on status only; the serial number lives on the unit
    async fn list(
        &self,
        filter: &EntryEquipmentFilter,
        query: &ListQuery,
    ) -> Result<(Vec<EntryEquipment>, u64), DomainError> {
        let rows: Vec<EntryEquipment> = self
            .entries
            .read()
            .unwrap()
            .values()
            .filter(|e| filter.status.map_or(true, |s| e.status == s))
            .cloned()
            .collect();
        Ok(paginate(rows, query, |e| (e.created_at, e.updated_at)))
    }
}

// ============================================================================
// In-Memory Accessory Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAccessoryRepository {
    accessories: Arc<RwLock<HashMap<AccessoryId, Accessory>>>,
}

impl InMemoryAccessoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accessory(self, accessory: Accessory) -> Self {
        self.accessories
            .write()
            .unwrap()
            .insert(accessory.id, accessory);
        self
    }
}

#[async_trait]
impl AccessoryRepository for InMemoryAccessoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Accessory>, DomainError> {
        let accessories = self.accessories.read().unwrap();
        Ok(accessories
            .values()
            .find(|a| equals_ci(&a.name, name))
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[AccessoryId]) -> Result<Vec<Accessory>, DomainError> {
        let accessories = self.accessories.read().unwrap();
        let wanted: HashSet<&AccessoryId> = ids.iter().collect();
        Ok(accessories
            .values()
            .filter(|a| wanted.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn create(&self, accessory: &NewAccessory) -> Result<Accessory, DomainError> {
        let created = Accessory {
            id: AccessoryId::new(),
            name: accessory.name.clone(),
            responsible_user: accessory.responsible_user.clone(),
            created_at: Utc::now(),
        };
        self.accessories
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Accessory>, DomainError> {
        let mut all: Vec<Accessory> = self.accessories.read().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

// ============================================================================
// In-Memory Part Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryPartRepository {
    parts: Arc<RwLock<HashMap<PartId, Part>>>,
}

impl InMemoryPartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_part(self, part: Part) -> Self {
        self.parts.write().unwrap().insert(part.id, part);
        self
    }

    fn set_price(
        &self,
        id: &PartId,
        apply: impl FnOnce(&mut Part),
    ) -> Result<Part, DomainError> {
        let mut parts = self.parts.write().unwrap();
        let part = parts
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("part {}", id)))?;
        apply(part);
        part.updated_at = Utc::now();
        Ok(part.clone())
    }
}

#[async_trait]
impl PartRepository for InMemoryPartRepository {
    async fn find_by_id(&self, id: &PartId) -> Result<Option<Part>, DomainError> {
        Ok(self.parts.read().unwrap().get(id).cloned())
    }

    async fn find_by_item(&self, item: &str) -> Result<Option<Part>, DomainError> {
        let parts = self.parts.read().unwrap();
        Ok(parts.values().find(|p| equals_ci(&p.item, item)).cloned())
    }

    async fn create(&self, part: &NewPart) -> Result<Part, DomainError> {
        let now = Utc::now();
        let created = Part {
            id: PartId::new(),
            item: part.item.clone(),
            description: part.description.clone(),
            cost_price: part.cost_price,
            sale_price: part.sale_price,
            obsolete: false,
            equip_models: part.equip_models.clone(),
            responsible_user: part.responsible_user.clone(),
            created_at: now,
            updated_at: now,
        };
        self.parts
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_cost_price(&self, id: &PartId, cents: i64) -> Result<Part, DomainError> {
        self.set_price(id, |p| p.cost_price = cents)
    }

    async fn update_sale_price(&self, id: &PartId, cents: i64) -> Result<Part, DomainError> {
        self.set_price(id, |p| p.sale_price = cents)
    }

    async fn list(
        &self,
        filter: &PartFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Part>, u64), DomainError> {
        let rows: Vec<Part> = self
            .parts
            .read()
            .unwrap()
            .values()
            .filter(|p| provided(&filter.item).map_or(true, |s| contains_ci(&p.item, s)))
            .cloned()
            .collect();
        Ok(paginate(rows, query, |p| (p.created_at, p.updated_at)))
    }
}

// ============================================================================
// In-Memory Analysis Repository
// ============================================================================

/// Shares the entry store so saving an analysis moves the entry forward
pub struct InMemoryAnalysisRepository {
    analyses: Arc<RwLock<HashMap<EntryEquipmentId, Analysis>>>,
    entries: Arc<InMemoryEntryEquipmentRepository>,
}

impl InMemoryAnalysisRepository {
    pub fn new(entries: Arc<InMemoryEntryEquipmentRepository>) -> Self {
        Self {
            analyses: Arc::new(RwLock::new(HashMap::new())),
            entries,
        }
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn create(&self, analysis: &NewAnalysis) -> Result<Analysis, DomainError> {
        self.entries
            .update_status(&analysis.entry_equipment_id, ProcessStatus::AwaitingApproval)
            .await?;

        let created = Analysis {
            id: AnalysisId::new(),
            entry_equipment_id: analysis.entry_equipment_id,
            observations: analysis.observations.clone(),
            total_price: analysis.total_price,
            items: analysis
                .items
                .iter()
                .map(|item| AnalysisItem {
                    part_id: item.part_id,
                    item: item.item.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            responsible_user: analysis.responsible_user.clone(),
            created_at: Utc::now(),
        };
        self.analyses
            .write()
            .unwrap()
            .insert(created.entry_equipment_id, created.clone());
        Ok(created)
    }

    async fn find_by_entry(
        &self,
        entry_id: &EntryEquipmentId,
    ) -> Result<Option<Analysis>, DomainError> {
        Ok(self.analyses.read().unwrap().get(entry_id).cloned())
    }
}

// ============================================================================
// In-Memory Account Repositories
// ============================================================================

#[derive(Default)]
pub struct InMemoryTypeAccountRepository {
    accounts: Arc<RwLock<HashMap<TypeAccountId, TypeAccount>>>,
}

impl InMemoryTypeAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_account(self, account: TypeAccount) -> Self {
        self.accounts.write().unwrap().insert(account.id, account);
        self
    }
}

#[async_trait]
impl TypeAccountRepository for InMemoryTypeAccountRepository {
    async fn find_by_id(&self, id: &TypeAccountId) -> Result<Option<TypeAccount>, DomainError> {
        Ok(self.accounts.read().unwrap().get(id).cloned())
    }

    async fn find_by_name(&self, type_name: &str) -> Result<Option<TypeAccount>, DomainError> {
        let accounts = self.accounts.read().unwrap();
        Ok(accounts
            .values()
            .find(|a| equals_ci(&a.type_name, type_name))
            .cloned())
    }

    async fn create(&self, account: &NewTypeAccount) -> Result<TypeAccount, DomainError> {
        let created = TypeAccount {
            id: TypeAccountId::new(),
            type_name: account.type_name.clone(),
            resources: account.resources,
            responsible_user: account.responsible_user.clone(),
        };
        self.accounts
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn list(&self, query: &ListQuery) -> Result<(Vec<TypeAccount>, u64), DomainError> {
        let mut all: Vec<TypeAccount> = self.accounts.read().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        let count = all.len() as u64;
        let rows = all
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .collect();
        Ok((rows, count))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let created = User {
            id: UserId::new(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            type_account_id: user.type_account_id,
            responsible_user: user.responsible_user.clone(),
            created_at: Utc::now(),
        };
        self.users
            .write()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: &NewSession) -> Result<Session, DomainError> {
        let created = Session {
            token_hash: session.token_hash.clone(),
            user_id: session.user_id,
            expires_at: session.expires_at,
        };
        self.sessions
            .write()
            .unwrap()
            .insert(created.token_hash.clone(), created.clone());
        Ok(created)
    }

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().unwrap().get(hash).cloned())
    }

    async fn delete(&self, hash: &str) -> Result<bool, DomainError> {
        Ok(self.sessions.write().unwrap().remove(hash).is_some())
    }
}

// ============================================================================
// Mock ZIP Code Lookup
// ============================================================================

/// Knows every CEP except the ones marked unknown
#[derive(Default)]
pub struct MockZipLookup {
    unknown: Arc<RwLock<HashSet<String>>>,
    failing: bool,
}

impl MockZipLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the service report `zip_code` as nonexistent
    pub fn unknown(self, zip_code: &str) -> Self {
        self.unknown.write().unwrap().insert(zip_code.to_string());
        self
    }

    /// Fail every lookup as if the service were down
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ZipCodeLookup for MockZipLookup {
    async fn lookup(&self, zip_code: &str) -> Result<Option<ZipAddress>, ZipLookupError> {
        if self.failing {
            return Err(ZipLookupError::Api { status: 503 });
        }
        if self.unknown.read().unwrap().contains(zip_code) {
            return Ok(None);
        }
        Ok(Some(ZipAddress {
            zip_code: zip_code.to_string(),
            street: "Praça da Sé".to_string(),
            neighborhood: "Sé".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        }))
    }
}
