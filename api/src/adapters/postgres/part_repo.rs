//! PostgreSQL adapter for PartRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{contains_ci, equals_ci, ordered};
use crate::domain::entities::{EquipModelId, ListQuery, NewPart, Part, PartFilter, PartId};
use crate::domain::ports::PartRepository;
use crate::domain::validation::provided;
use crate::entity::{part_equip_models, parts};
use crate::error::DomainError;

/// PostgreSQL implementation of PartRepository
pub struct PostgresPartRepository {
    db: DatabaseConnection,
}

impl PostgresPartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_models(&self, rows: Vec<parts::Model>) -> Result<Vec<Part>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let links = part_equip_models::Entity::find()
            .filter(part_equip_models::Column::PartId.is_in(rows.iter().map(|r| r.id)))
            .all(&self.db)
            .await?;

        let mut by_part: HashMap<Uuid, Vec<EquipModelId>> = HashMap::new();
        for link in links {
            by_part
                .entry(link.part_id)
                .or_default()
                .push(EquipModelId(link.equip_model_id));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let models = by_part.remove(&row.id).unwrap_or_default();
                to_part(row, models)
            })
            .collect())
    }

    async fn update_price(
        &self,
        id: &PartId,
        cost_price: Option<i64>,
        sale_price: Option<i64>,
    ) -> Result<Part, DomainError> {
        let existing = parts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("part {}", id)))?;

        let mut active: parts::ActiveModel = existing.into();
        if let Some(cents) = cost_price {
            active.cost_price = Set(cents);
        }
        if let Some(cents) = sale_price {
            active.sale_price = Set(cents);
        }
        active.updated_at = Set(Utc::now().fixed_offset());
        let row = active.update(&self.db).await?;

        self.with_models(vec![row])
            .await?
            .pop()
            .ok_or_else(|| DomainError::NotFound(format!("part {}", id)))
    }
}

#[async_trait]
impl PartRepository for PostgresPartRepository {
    async fn find_by_id(&self, id: &PartId) -> Result<Option<Part>, DomainError> {
        let result = parts::Entity::find_by_id(id.0).one(&self.db).await?;

        match result {
            Some(row) => Ok(self.with_models(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_item(&self, item: &str) -> Result<Option<Part>, DomainError> {
        let result = parts::Entity::find()
            .filter(equals_ci(parts::Column::Item, item))
            .one(&self.db)
            .await?;

        match result {
            Some(row) => Ok(self.with_models(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, part: &NewPart) -> Result<Part, DomainError> {
        let id = Uuid::new_v4();
        let now = Utc::now().fixed_offset();

        let txn = self.db.begin().await?;

        let model = parts::ActiveModel {
            id: Set(id),
            item: Set(part.item.clone()),
            description: Set(part.description.clone()),
            cost_price: Set(part.cost_price),
            sale_price: Set(part.sale_price),
            obsolete: Set(false),
            responsible_user: Set(part.responsible_user.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let row = model.insert(&txn).await?;

        let links = part.equip_models.iter().map(|model| part_equip_models::ActiveModel {
            part_id: Set(id),
            equip_model_id: Set(model.0),
        });
        part_equip_models::Entity::insert_many(links)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(to_part(row, part.equip_models.clone()))
    }

    async fn update_cost_price(&self, id: &PartId, cents: i64) -> Result<Part, DomainError> {
        self.update_price(id, Some(cents), None).await
    }

    async fn update_sale_price(&self, id: &PartId, cents: i64) -> Result<Part, DomainError> {
        self.update_price(id, None, Some(cents)).await
    }

    async fn list(
        &self,
        filter: &PartFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Part>, u64), DomainError> {
        let mut select = parts::Entity::find();
        if let Some(item) = provided(&filter.item) {
            select = select.filter(contains_ci(parts::Column::Item, item));
        }

        let count = select.clone().count(&self.db).await?;
        let rows = ordered(select, query, parts::Column::CreatedAt, parts::Column::UpdatedAt)
            .offset(query.offset())
            .limit(query.limit())
            .all(&self.db)
            .await?;

        Ok((self.with_models(rows).await?, count))
    }
}

fn to_part(model: parts::Model, equip_models: Vec<EquipModelId>) -> Part {
    Part {
        id: PartId(model.id),
        item: model.item,
        description: model.description,
        cost_price: model.cost_price,
        sale_price: model.sale_price,
        obsolete: model.obsolete,
        equip_models,
        responsible_user: model.responsible_user,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
