//! PostgreSQL adapter for EntryEquipmentRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{contains_ci, ordered};
use crate::domain::entities::{
    AccessoryId, DeliveryMethod, EntryEquipment, EntryEquipmentFilter, EntryEquipmentId, EquipId,
    ListQuery, NewEntryEquipment, ProcessStatus,
};
use crate::domain::ports::EntryEquipmentRepository;
use crate::domain::validation::provided;
use crate::entity::{entry_accessories, entry_equipments, equips};
use crate::error::DomainError;

/// PostgreSQL implementation of EntryEquipmentRepository
pub struct PostgresEntryEquipmentRepository {
    db: DatabaseConnection,
}

impl PostgresEntryEquipmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load accessory links for the given rows and build domain records
    async fn with_accessories(
        &self,
        rows: Vec<entry_equipments::Model>,
    ) -> Result<Vec<EntryEquipment>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let links = entry_accessories::Entity::find()
            .filter(entry_accessories::Column::EntryEquipmentId.is_in(rows.iter().map(|r| r.id)))
            .all(&self.db)
            .await?;

        let mut by_entry: HashMap<Uuid, Vec<AccessoryId>> = HashMap::new();
        for link in links {
            by_entry
                .entry(link.entry_equipment_id)
                .or_default()
                .push(AccessoryId(link.accessory_id));
        }

        rows.into_iter()
            .map(|row| {
                let accessories = by_entry.remove(&row.id).unwrap_or_default();
                to_entry(row, accessories)
            })
            .collect()
    }
}

#[async_trait]
impl EntryEquipmentRepository for PostgresEntryEquipmentRepository {
    async fn find_by_id(
        &self,
        id: &EntryEquipmentId,
    ) -> Result<Option<EntryEquipment>, DomainError> {
        let result = entry_equipments::Entity::find_by_id(id.0)
            .one(&self.db)
            .await?;

        match result {
            Some(row) => Ok(self.with_accessories(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, entry: &NewEntryEquipment) -> Result<EntryEquipment, DomainError> {
        let delivery = entry
            .delivery
            .ok_or_else(|| DomainError::Internal("entry without delivery method".to_string()))?;
        let id = Uuid::new_v4();
        let now = Utc::now().fixed_offset();

        let txn = self.db.begin().await?;

        let model = entry_equipments::ActiveModel {
            id: Set(id),
            equip_id: Set(entry.equip_id.0),
            external_damage: Set(entry.external_damage),
            details: Set(entry.details.clone()),
            defect: Set(entry.defect.clone()),
            delivery: Set(delivery.to_string()),
            client_name: Set(entry.client_name.clone()),
            rg: Set(entry.rg.clone()),
            cpf: Set(entry.cpf.clone()),
            sender_name: Set(entry.sender_name.clone()),
            properly_packed: Set(entry.properly_packed),
            zip_code: Set(entry.zip_code.clone()),
            state: Set(entry.state.clone()),
            city: Set(entry.city.clone()),
            neighborhood: Set(entry.neighborhood.clone()),
            street: Set(entry.street.clone()),
            number: Set(entry.number.clone()),
            motoboy_name: Set(entry.motoboy_name.clone()),
            responsible_name: Set(entry.responsible_name.clone()),
            technician_name: Set(entry.technician_name.clone()),
            status: Set(ProcessStatus::AwaitingAnalysis.as_str().to_string()),
            responsible_user: Set(entry.responsible_user.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let row = model.insert(&txn).await?;

        if !entry.accessories.is_empty() {
            let links = entry.accessories.iter().map(|accessory| entry_accessories::ActiveModel {
                entry_equipment_id: Set(id),
                accessory_id: Set(accessory.0),
            });
            entry_accessories::Entity::insert_many(links)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        to_entry(row, entry.accessories.clone())
    }

    async fn update_status(
        &self,
        id: &EntryEquipmentId,
        status: ProcessStatus,
    ) -> Result<EntryEquipment, DomainError> {
        let row = entry_equipments::ActiveModel {
            id: Set(id.0),
            status: Set(status.as_str().to_string()),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        self.with_accessories(vec![row])
            .await?
            .pop()
            .ok_or_else(|| DomainError::NotFound(format!("entry {}", id)))
    }

    async fn list(
        &self,
        filter: &EntryEquipmentFilter,
        query: &ListQuery,
    ) -> Result<(Vec<EntryEquipment>, u64), DomainError> {
        let mut select = entry_equipments::Entity::find()
            .join(JoinType::InnerJoin, entry_equipments::Relation::Equip.def());
        if let Some(serial) = provided(&filter.serial_number) {
            select = select.filter(contains_ci(equips::Column::SerialNumber, serial));
        }
        if let Some(status) = filter.status {
            select = select.filter(entry_equipments::Column::Status.eq(status.as_str()));
        }

        let count = select.clone().count(&self.db).await?;
        let rows = ordered(
            select,
            query,
            entry_equipments::Column::CreatedAt,
            entry_equipments::Column::UpdatedAt,
        )
        .offset(query.offset())
        .limit(query.limit())
        .all(&self.db)
        .await?;

        Ok((self.with_accessories(rows).await?, count))
    }
}

fn to_entry(
    model: entry_equipments::Model,
    accessories: Vec<AccessoryId>,
) -> Result<EntryEquipment, DomainError> {
    let delivery: DeliveryMethod = model
        .delivery
        .parse()
        .map_err(|e: String| DomainError::Internal(e))?;
    let status: ProcessStatus = model
        .status
        .parse()
        .map_err(|e: String| DomainError::Internal(e))?;

    Ok(EntryEquipment {
        id: EntryEquipmentId(model.id),
        equip_id: EquipId(model.equip_id),
        external_damage: model.external_damage,
        details: model.details,
        defect: model.defect,
        delivery,
        client_name: model.client_name,
        rg: model.rg,
        cpf: model.cpf,
        sender_name: model.sender_name,
        properly_packed: model.properly_packed,
        zip_code: model.zip_code,
        state: model.state,
        city: model.city,
        neighborhood: model.neighborhood,
        street: model.street,
        number: model.number,
        motoboy_name: model.motoboy_name,
        responsible_name: model.responsible_name,
        technician_name: model.technician_name,
        accessories,
        status,
        responsible_user: model.responsible_user,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
