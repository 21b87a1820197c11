//! PostgreSQL adapter for AnalysisRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    Analysis, AnalysisId, AnalysisItem, EntryEquipmentId, NewAnalysis, PartId, ProcessStatus,
};
use crate::domain::ports::AnalysisRepository;
use crate::entity::{analyses, analysis_parts, entry_equipments, parts};
use crate::error::DomainError;

/// PostgreSQL implementation of AnalysisRepository
pub struct PostgresAnalysisRepository {
    db: DatabaseConnection,
}

impl PostgresAnalysisRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnalysisRepository for PostgresAnalysisRepository {
    async fn create(&self, analysis: &NewAnalysis) -> Result<Analysis, DomainError> {
        let id = Uuid::new_v4();
        let now = Utc::now().fixed_offset();

        let txn = self.db.begin().await?;

        let row = analyses::ActiveModel {
            id: Set(id),
            entry_equipment_id: Set(analysis.entry_equipment_id.0),
            observations: Set(analysis.observations.clone()),
            total_price: Set(analysis.total_price),
            responsible_user: Set(analysis.responsible_user.clone()),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let items = analysis.items.iter().map(|item| analysis_parts::ActiveModel {
            analysis_id: Set(id),
            part_id: Set(item.part_id.0),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
        });
        analysis_parts::Entity::insert_many(items).exec(&txn).await?;

        entry_equipments::ActiveModel {
            id: Set(analysis.entry_equipment_id.0),
            status: Set(ProcessStatus::AwaitingApproval.as_str().to_string()),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        Ok(Analysis {
            id: AnalysisId(row.id),
            entry_equipment_id: EntryEquipmentId(row.entry_equipment_id),
            observations: row.observations,
            total_price: row.total_price,
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
            responsible_user: row.responsible_user,
            created_at: row.created_at.with_timezone(&Utc),
        })
    }

    async fn find_by_entry(
        &self,
        entry_id: &EntryEquipmentId,
    ) -> Result<Option<Analysis>, DomainError> {
        let Some(row) = analyses::Entity::find()
            .filter(analyses::Column::EntryEquipmentId.eq(entry_id.0))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let items = analysis_parts::Entity::find()
            .filter(analysis_parts::Column::AnalysisId.eq(row.id))
            .find_also_related(parts::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(line, part)| AnalysisItem {
                part_id: PartId(line.part_id),
                item: part.map(|p| p.item).unwrap_or_default(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Ok(Some(Analysis {
            id: AnalysisId(row.id),
            entry_equipment_id: EntryEquipmentId(row.entry_equipment_id),
            observations: row.observations,
            total_price: row.total_price,
            items,
            responsible_user: row.responsible_user,
            created_at: row.created_at.with_timezone(&Utc),
        }))
    }
}
