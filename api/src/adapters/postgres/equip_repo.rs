//! PostgreSQL adapter for EquipRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use super::{contains_ci, ordered};
use crate::domain::entities::{
    BadgeType, CompanyId, Equip, EquipFilter, EquipId, EquipModelId, ListQuery, NewEquip,
    ReaderColor,
};
use crate::domain::ports::EquipRepository;
use crate::domain::validation::{only_digits_string, provided};
use crate::entity::{companies, equip_marks, equip_models, equip_types, equips};
use crate::error::DomainError;

/// PostgreSQL implementation of EquipRepository
pub struct PostgresEquipRepository {
    db: DatabaseConnection,
}

impl PostgresEquipRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EquipRepository for PostgresEquipRepository {
    async fn find_by_id(&self, id: &EquipId) -> Result<Option<Equip>, DomainError> {
        let result = equips::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_serial_number(&self, serial: &str) -> Result<Option<Equip>, DomainError> {
        let result = equips::Entity::find()
            .filter(equips::Column::SerialNumber.eq(serial))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, equip: &NewEquip) -> Result<Equip, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = equips::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(equip.company_id.0),
            equip_model_id: Set(equip.equip_model_id.0),
            serial_number: Set(equip.serial_number.clone()),
            reader_color: Set(equip.reader_color.to_string()),
            badge_type: Set(equip.badge_type.to_string()),
            details: Set(equip.details.clone()),
            proximity: Set(equip.proximity),
            bio: Set(equip.bio),
            barcode: Set(equip.barcode),
            cartographic: Set(equip.cartographic),
            responsible_user: Set(equip.responsible_user.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, equip: &Equip) -> Result<Equip, DomainError> {
        let result = equips::ActiveModel {
            id: Set(equip.id.0),
            equip_model_id: Set(equip.equip_model_id.0),
            serial_number: Set(equip.serial_number.clone()),
            reader_color: Set(equip.reader_color.to_string()),
            badge_type: Set(equip.badge_type.to_string()),
            details: Set(equip.details.clone()),
            proximity: Set(equip.proximity),
            bio: Set(equip.bio),
            barcode: Set(equip.barcode),
            cartographic: Set(equip.cartographic),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn list(
        &self,
        filter: &EquipFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Equip>, u64), DomainError> {
        let mut select = equips::Entity::find()
            .join(JoinType::InnerJoin, equips::Relation::Company.def())
            .join(JoinType::InnerJoin, equips::Relation::EquipModel.def())
            .join(JoinType::InnerJoin, equip_models::Relation::EquipMark.def())
            .join(JoinType::InnerJoin, equip_marks::Relation::EquipType.def());

        if let Some(serial) = provided(&filter.serial_number) {
            select = select.filter(contains_ci(equips::Column::SerialNumber, serial));
        }
        if let Some(cnpj) = provided(&filter.cnpj) {
            select = select.filter(companies::Column::Cnpj.starts_with(only_digits_string(cnpj)));
        }
        if let Some(name) = provided(&filter.razao_social) {
            select = select.filter(contains_ci(companies::Column::RazaoSocial, name));
        }
        if let Some(kind) = filter.kind {
            select = select.filter(equip_types::Column::Kind.eq(kind.as_str()));
        }
        if let Some(mark) = provided(&filter.mark) {
            select = select.filter(contains_ci(equip_marks::Column::Mark, mark));
        }
        if let Some(model) = provided(&filter.model) {
            select = select.filter(contains_ci(equip_models::Column::Model, model));
        }

        let count = select
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let rows = ordered(
            select,
            query,
            equips::Column::CreatedAt,
            equips::Column::UpdatedAt,
        )
        .offset(query.offset())
        .limit(query.limit())
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok((rows.into_iter().map(|m| m.into()).collect(), count))
    }
}

impl From<equips::Model> for Equip {
    fn from(model: equips::Model) -> Self {
        Equip {
            id: EquipId(model.id),
            company_id: CompanyId(model.company_id),
            equip_model_id: EquipModelId(model.equip_model_id),
            serial_number: model.serial_number,
            reader_color: model
                .reader_color
                .parse()
                .unwrap_or(ReaderColor::NotApplicable),
            badge_type: model
                .badge_type
                .parse()
                .unwrap_or(BadgeType::NotApplicable),
            details: model.details,
            proximity: model.proximity,
            bio: model.bio,
            barcode: model.barcode,
            cartographic: model.cartographic,
            responsible_user: model.responsible_user,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
