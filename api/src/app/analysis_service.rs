//! Technical analysis service
//!
//! A technician lists the parts an entry needs. Each line is priced at the
//! part's current sale price and saving the analysis moves the entry to
//! `orcamento`.

use std::sync::Arc;

use super::responsible_user::check_responsible_user;
use crate::domain::entities::{
    Analysis, AnalysisInput, EntryEquipmentId, NewAnalysis, NewAnalysisItem, PartId,
    ProcessStatus,
};
use crate::domain::ports::{
    AnalysisRepository, EntryEquipmentRepository, PartRepository, UserRepository,
};
use crate::domain::validation::{provided, FieldErrors};
use crate::error::{AppError, DomainError};

pub struct AnalysisService<AR, NR, PR, UR>
where
    AR: AnalysisRepository + ?Sized,
    NR: EntryEquipmentRepository + ?Sized,
    PR: PartRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    analyses: Arc<AR>,
    entries: Arc<NR>,
    parts: Arc<PR>,
    users: Arc<UR>,
}

impl<AR, NR, PR, UR> AnalysisService<AR, NR, PR, UR>
where
    AR: AnalysisRepository + ?Sized,
    NR: EntryEquipmentRepository + ?Sized,
    PR: PartRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    pub fn new(analyses: Arc<AR>, entries: Arc<NR>, parts: Arc<PR>, users: Arc<UR>) -> Self {
        Self {
            analyses,
            entries,
            parts,
            users,
        }
    }

    pub async fn add(&self, input: AnalysisInput) -> Result<Analysis, AppError> {
        let mut errors = FieldErrors::new();

        let entry = match input.entry_equipment_id {
            None => {
                errors.set("entryEquipmentId", "entryEquipmentId cannot be null");
                None
            }
            Some(id) => match self.entries.find_by_id(&id.into()).await? {
                None => {
                    errors.set("entryEquipmentId", "entryEquipment not found");
                    None
                }
                Some(entry) if entry.status != ProcessStatus::AwaitingAnalysis => {
                    errors.set("entryEquipmentId", "entryEquipment is not awaiting analysis");
                    None
                }
                Some(entry) => Some(entry),
            },
        };

        let observations = provided(&input.observations);
        if observations.is_none() {
            errors.set("observations", "observations cannot be null");
        }

        let items = self.check_parts(&input, &mut errors).await?;
        let total_price = total_price(&items);
        if total_price.is_none() && !errors.has("parts") {
            errors.set("parts", "total price is too large");
        }

        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        errors.into_result()?;

        let (Some(entry), Some(observations), Some(responsible_user), Some(total_price)) =
            (entry, observations, responsible_user, total_price)
        else {
            return Err(AppError::Internal("validated analysis fields missing".into()));
        };

        let analysis = self
            .analyses
            .create(&NewAnalysis {
                entry_equipment_id: entry.id,
                observations: observations.to_string(),
                total_price,
                items,
                responsible_user,
            })
            .await?;

        tracing::info!(
            analysis_id = %analysis.id,
            entry_id = %entry.id,
            total_price = analysis.total_price,
            "Analysis registered"
        );

        Ok(analysis)
    }

    pub async fn get_by_entry(&self, entry_id: &EntryEquipmentId) -> Result<Analysis, AppError> {
        self.analyses
            .find_by_entry(entry_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("analysis for entry {}", entry_id)).into())
    }

    /// Price each requested part, merging repeated part ids into one line
    async fn check_parts(
        &self,
        input: &AnalysisInput,
        errors: &mut FieldErrors,
    ) -> Result<Vec<NewAnalysisItem>, DomainError> {
        let mut items: Vec<NewAnalysisItem> = Vec::new();

        let requested = match input.parts.as_deref() {
            None | Some([]) => {
                errors.set("parts", "parts cannot be null");
                return Ok(items);
            }
            Some(parts) => parts,
        };

        for line in requested {
            if line.quantity < 1 {
                errors.set("parts", "quantity must be at least 1");
                continue;
            }

            let part_id = PartId(line.part_id);
            if let Some(existing) = items.iter_mut().find(|i| i.part_id == part_id) {
                match existing.quantity.checked_add(line.quantity) {
                    Some(quantity) => existing.quantity = quantity,
                    None => errors.set("parts", "quantity is too large"),
                }
                continue;
            }

            match self.parts.find_by_id(&part_id).await? {
                None => errors.set("parts", "part not found"),
                Some(part) if part.obsolete => {
                    errors.set("parts", format!("{} is obsolete", part.item))
                }
                Some(part) => items.push(NewAnalysisItem {
                    part_id,
                    item: part.item,
                    quantity: line.quantity,
                    unit_price: part.sale_price,
                }),
            }
        }

        Ok(items)
    }
}

/// Sum of quantity times unit price, `None` once it leaves the `i64` range
fn total_price(items: &[NewAnalysisItem]) -> Option<i64> {
    items.iter().try_fold(0i64, |total, item| {
        item.unit_price
            .checked_mul(i64::from(item.quantity))?
            .checked_add(total)
    })
}
