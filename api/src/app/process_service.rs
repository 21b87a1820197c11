//! Repair workflow
//!
//! `analise` -> `orcamento` -> `aprovado` | `reprovado`, then `reparo` and
//! `concluido`. The move into `orcamento` happens when an analysis is saved.

use std::sync::Arc;

use crate::domain::entities::{
    EntryEquipment, EntryEquipmentFilter, EntryEquipmentId, ListQuery, Page, ProcessStatus,
};
use crate::domain::ports::EntryEquipmentRepository;
use crate::domain::validation::FieldErrors;
use crate::error::{AppError, DomainError, FieldValidationError};

pub struct ProcessService<NR: EntryEquipmentRepository + ?Sized> {
    entries: Arc<NR>,
}

impl<NR: EntryEquipmentRepository + ?Sized> ProcessService<NR> {
    pub fn new(entries: Arc<NR>) -> Self {
        Self { entries }
    }

    /// Entries in `status`, or every entry when it is omitted
    pub async fn list(
        &self,
        status: Option<ProcessStatus>,
        query: &ListQuery,
    ) -> Result<Page<EntryEquipment>, AppError> {
        let filter = EntryEquipmentFilter {
            serial_number: None,
            status,
        };
        let (rows, count) = self.entries.list(&filter, query).await?;
        Ok(Page::new(query, rows, count))
    }

    pub async fn advance(
        &self,
        id: &EntryEquipmentId,
        status: Option<&str>,
    ) -> Result<EntryEquipment, AppError> {
        let Some(next) = status.and_then(|s| s.parse::<ProcessStatus>().ok()) else {
            return Err(FieldValidationError::single("status", "Status inválido.").into());
        };

        let entry = self
            .entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("entry {}", id)))?;

        let mut errors = FieldErrors::new();
        if next == ProcessStatus::AwaitingApproval {
            errors.set("status", "O orçamento é gerado pela análise.");
        } else if !entry.status.can_advance_to(next) {
            errors.set(
                "status",
                format!("Não é possível passar de {} para {}.", entry.status, next),
            );
        }
        errors.into_result()?;

        let updated = self.entries.update_status(id, next).await?;

        tracing::info!(entry_id = %id, from = %entry.status, to = %next, "Process status changed");

        Ok(updated)
    }
}
