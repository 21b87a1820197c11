//! PostgreSQL adapter for EquipCatalogRepository
//!
//! Models are always returned with their mark and type attached. The type
//! table holds at most one row per kind, so it is loaded whole when needed.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use super::{contains_ci, equals_ci, ordered};
use crate::domain::entities::{
    EquipKind, EquipMark, EquipMarkId, EquipModel, EquipModelFilter, EquipModelId, EquipType,
    EquipTypeId, ListQuery, NewEquipMark, NewEquipModel,
};
use crate::domain::ports::EquipCatalogRepository;
use crate::domain::validation::provided;
use crate::entity::{equip_marks, equip_models, equip_types};
use crate::error::DomainError;

/// PostgreSQL implementation of EquipCatalogRepository
pub struct PostgresEquipCatalogRepository {
    db: DatabaseConnection,
}

impl PostgresEquipCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn types_by_id(&self) -> Result<HashMap<Uuid, EquipType>, DomainError> {
        let rows = equip_types::Entity::find().all(&self.db).await?;
        rows.into_iter()
            .map(|m| Ok((m.id, to_equip_type(m)?)))
            .collect()
    }

    async fn with_types(&self, marks: Vec<equip_marks::Model>) -> Result<Vec<EquipMark>, DomainError> {
        let types = self.types_by_id().await?;
        marks
            .into_iter()
            .map(|m| to_equip_mark(m, &types))
            .collect()
    }

    /// Attach marks and types to bare model rows, keeping their order
    async fn hydrate(&self, models: Vec<equip_models::Model>) -> Result<Vec<EquipModel>, DomainError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let mark_ids: Vec<Uuid> = models.iter().map(|m| m.equip_mark_id).collect();
        let marks = equip_marks::Entity::find()
            .filter(equip_marks::Column::Id.is_in(mark_ids))
            .all(&self.db)
            .await?;
        let marks: HashMap<Uuid, EquipMark> = self
            .with_types(marks)
            .await?
            .into_iter()
            .map(|m| (m.id.0, m))
            .collect();

        models
            .into_iter()
            .map(|model| {
                let mark = marks.get(&model.equip_mark_id).cloned().ok_or_else(|| {
                    DomainError::Internal(format!("model {} has no mark", model.id))
                })?;
                Ok(to_equip_model(model, mark))
            })
            .collect()
    }
}

#[async_trait]
impl EquipCatalogRepository for PostgresEquipCatalogRepository {
    async fn find_type(&self, kind: EquipKind) -> Result<Option<EquipType>, DomainError> {
        let result = equip_types::Entity::find()
            .filter(equip_types::Column::Kind.eq(kind.as_str()))
            .one(&self.db)
            .await?;

        result.map(to_equip_type).transpose()
    }

    async fn find_or_create_type(&self, kind: EquipKind) -> Result<EquipType, DomainError> {
        if let Some(existing) = self.find_type(kind).await? {
            return Ok(existing);
        }

        let model = equip_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind.as_str().to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        };
        let result = model.insert(&self.db).await?;

        to_equip_type(result)
    }

    async fn find_mark_by_id(&self, id: &EquipMarkId) -> Result<Option<EquipMark>, DomainError> {
        let result = equip_marks::Entity::find_by_id(id.0).one(&self.db).await?;

        match result {
            Some(mark) => Ok(self.with_types(vec![mark]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_mark(
        &self,
        kind: EquipKind,
        mark: &str,
    ) -> Result<Option<EquipMark>, DomainError> {
        let result = equip_marks::Entity::find()
            .join(JoinType::InnerJoin, equip_marks::Relation::EquipType.def())
            .filter(equip_types::Column::Kind.eq(kind.as_str()))
            .filter(equals_ci(equip_marks::Column::Mark, mark))
            .one(&self.db)
            .await?;

        match result {
            Some(mark) => Ok(self.with_types(vec![mark]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create_mark(&self, mark: &NewEquipMark) -> Result<EquipMark, DomainError> {
        let model = equip_marks::ActiveModel {
            id: Set(Uuid::new_v4()),
            equip_type_id: Set(mark.equip_type_id.0),
            mark: Set(mark.mark.clone()),
            responsible_user: Set(mark.responsible_user.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };
        let result = model.insert(&self.db).await?;

        self.with_types(vec![result])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Internal("mark vanished after insert".to_string()))
    }

    async fn find_model_by_id(
        &self,
        id: &EquipModelId,
    ) -> Result<Option<EquipModel>, DomainError> {
        let result = equip_models::Entity::find_by_id(id.0).one(&self.db).await?;

        match result {
            Some(model) => Ok(self.hydrate(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_models_by_name(
        &self,
        mark_id: &EquipMarkId,
        model: &str,
    ) -> Result<Vec<EquipModel>, DomainError> {
        let results = equip_models::Entity::find()
            .filter(equip_models::Column::EquipMarkId.eq(mark_id.0))
            .filter(equals_ci(equip_models::Column::Model, model))
            .all(&self.db)
            .await?;

        self.hydrate(results).await
    }

    async fn create_model(&self, model: &NewEquipModel) -> Result<EquipModel, DomainError> {
        let now = Utc::now().fixed_offset();
        let active = equip_models::ActiveModel {
            id: Set(Uuid::new_v4()),
            equip_mark_id: Set(model.equip_mark_id.0),
            model: Set(model.model.clone()),
            description: Set(model.description.clone()),
            responsible_user: Set(model.responsible_user.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = active.insert(&self.db).await?;

        self.hydrate(vec![result])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Internal("model vanished after insert".to_string()))
    }

    async fn list_models(
        &self,
        filter: &EquipModelFilter,
        query: &ListQuery,
    ) -> Result<(Vec<EquipModel>, u64), DomainError> {
        let mut select = equip_models::Entity::find()
            .join(JoinType::InnerJoin, equip_models::Relation::EquipMark.def())
            .join(JoinType::InnerJoin, equip_marks::Relation::EquipType.def());
        if let Some(kind) = filter.kind {
            select = select.filter(equip_types::Column::Kind.eq(kind.as_str()));
        }
        if let Some(mark) = provided(&filter.mark) {
            select = select.filter(contains_ci(equip_marks::Column::Mark, mark));
        }
        if let Some(model) = provided(&filter.model) {
            select = select.filter(contains_ci(equip_models::Column::Model, model));
        }

        let count = select.clone().count(&self.db).await?;
        let rows = ordered(
            select,
            query,
            equip_models::Column::CreatedAt,
            equip_models::Column::UpdatedAt,
        )
        .offset(query.offset())
        .limit(query.limit())
        .all(&self.db)
        .await?;

        Ok((self.hydrate(rows).await?, count))
    }

    async fn list_marks_by_type(&self, kind: EquipKind) -> Result<Vec<EquipMark>, DomainError> {
        let results = equip_marks::Entity::find()
            .join(JoinType::InnerJoin, equip_marks::Relation::EquipType.def())
            .filter(equip_types::Column::Kind.eq(kind.as_str()))
            .order_by_asc(equip_marks::Column::Mark)
            .all(&self.db)
            .await?;

        self.with_types(results).await
    }

    async fn list_models_by_mark(
        &self,
        kind: EquipKind,
        mark: &str,
    ) -> Result<Vec<EquipModel>, DomainError> {
        let results = equip_models::Entity::find()
            .join(JoinType::InnerJoin, equip_models::Relation::EquipMark.def())
            .join(JoinType::InnerJoin, equip_marks::Relation::EquipType.def())
            .filter(equip_types::Column::Kind.eq(kind.as_str()))
            .filter(equals_ci(equip_marks::Column::Mark, mark))
            .order_by_asc(equip_models::Column::Model)
            .all(&self.db)
            .await?;

        self.hydrate(results).await
    }
}

fn to_equip_type(model: equip_types::Model) -> Result<EquipType, DomainError> {
    let kind = model
        .kind
        .parse()
        .map_err(|e: String| DomainError::Internal(e))?;

    Ok(EquipType {
        id: EquipTypeId(model.id),
        kind,
    })
}

fn to_equip_mark(
    model: equip_marks::Model,
    types: &HashMap<Uuid, EquipType>,
) -> Result<EquipMark, DomainError> {
    let equip_type = types.get(&model.equip_type_id).cloned().ok_or_else(|| {
        DomainError::Internal(format!("mark {} has no type", model.id))
    })?;

    Ok(EquipMark {
        id: EquipMarkId(model.id),
        mark: model.mark,
        equip_type,
        responsible_user: model.responsible_user,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

fn to_equip_model(model: equip_models::Model, mark: EquipMark) -> EquipModel {
    EquipModel {
        id: EquipModelId(model.id),
        model: model.model,
        description: model.description,
        equip_mark: mark,
        responsible_user: model.responsible_user,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
