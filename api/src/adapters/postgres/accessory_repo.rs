//! PostgreSQL adapter for AccessoryRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::equals_ci;
use crate::domain::entities::{Accessory, AccessoryId, NewAccessory};
use crate::domain::ports::AccessoryRepository;
use crate::entity::accessories;
use crate::error::DomainError;

/// PostgreSQL implementation of AccessoryRepository
pub struct PostgresAccessoryRepository {
    db: DatabaseConnection,
}

impl PostgresAccessoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccessoryRepository for PostgresAccessoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Accessory>, DomainError> {
        let result = accessories::Entity::find()
            .filter(equals_ci(accessories::Column::Name, name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_ids(&self, ids: &[AccessoryId]) -> Result<Vec<Accessory>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = accessories::Entity::find()
            .filter(accessories::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, accessory: &NewAccessory) -> Result<Accessory, DomainError> {
        let model = accessories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(accessory.name.clone()),
            responsible_user: Set(accessory.responsible_user.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn list_all(&self) -> Result<Vec<Accessory>, DomainError> {
        let results = accessories::Entity::find()
            .order_by_asc(accessories::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

impl From<accessories::Model> for Accessory {
    fn from(model: accessories::Model) -> Self {
        Accessory {
            id: AccessoryId(model.id),
            name: model.name,
            responsible_user: model.responsible_user,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
