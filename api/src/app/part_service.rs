//! Spare part service
//!
//! Prices arrive as display strings and are stored in cents.

use std::sync::Arc;

use super::responsible_user::check_responsible_user;
use crate::domain::entities::{
    EquipModelId, ListQuery, NewPart, Page, Part, PartFilter, PartId, PartInput, PriceUpdate,
};
use crate::domain::ports::{EquipCatalogRepository, PartRepository, UserRepository};
use crate::domain::validation::{parse_price, provided, FieldErrors};
use crate::error::{AppError, DomainError};

pub struct PartService<PR, ER, UR>
where
    PR: PartRepository + ?Sized,
    ER: EquipCatalogRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    parts: Arc<PR>,
    catalog: Arc<ER>,
    users: Arc<UR>,
}

impl<PR, ER, UR> PartService<PR, ER, UR>
where
    PR: PartRepository + ?Sized,
    ER: EquipCatalogRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    pub fn new(parts: Arc<PR>, catalog: Arc<ER>, users: Arc<UR>) -> Self {
        Self {
            parts,
            catalog,
            users,
        }
    }

    pub async fn add(&self, input: PartInput) -> Result<Part, AppError> {
        let mut errors = FieldErrors::new();

        let item = provided(&input.item);
        match item {
            None => errors.set("item", "item cannot be null"),
            Some(item) => {
                if self.parts.find_by_item(item).await?.is_some() {
                    errors.set("item", "item already exists");
                }
            }
        }

        let cost_price = check_price(&input.cost_price, "costPrice", &mut errors);
        let sale_price = check_price(&input.sale_price, "salePrice", &mut errors);

        let mut equip_models: Vec<EquipModelId> = Vec::new();
        match input.equip_models.as_deref() {
            None | Some([]) => errors.set("equipModels", "equipModels cannot be null"),
            Some(refs) => {
                for model_ref in refs {
                    let id = EquipModelId(model_ref.id);
                    if self.catalog.find_model_by_id(&id).await?.is_none() {
                        errors.set("equipModels", "equipModel not found");
                    } else if !equip_models.contains(&id) {
                        equip_models.push(id);
                    }
                }
            }
        }

        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        errors.into_result()?;

        let (Some(item), Some(cost_price), Some(sale_price), Some(responsible_user)) =
            (item, cost_price, sale_price, responsible_user)
        else {
            return Err(AppError::Internal("validated part fields missing".into()));
        };

        let part = self
            .parts
            .create(&NewPart {
                item: item.to_string(),
                description: provided(&input.description).unwrap_or_default().to_string(),
                cost_price,
                sale_price,
                equip_models,
                responsible_user,
            })
            .await?;

        tracing::info!(part_id = %part.id, item = %part.item, "Part registered");

        Ok(part)
    }

    pub async fn update_cost_price(&self, update: PriceUpdate) -> Result<Part, AppError> {
        let (id, cents) = parse_update(update.id, &update.new_cost_price, "newCostPrice")?;
        self.ensure_exists(&id).await?;

        let part = self.parts.update_cost_price(&id, cents).await?;
        tracing::info!(part_id = %id, cost_price = cents, "Part cost price updated");
        Ok(part)
    }

    pub async fn update_sale_price(&self, update: PriceUpdate) -> Result<Part, AppError> {
        let (id, cents) = parse_update(update.id, &update.new_sale_price, "newSalePrice")?;
        self.ensure_exists(&id).await?;

        let part = self.parts.update_sale_price(&id, cents).await?;
        tracing::info!(part_id = %id, sale_price = cents, "Part sale price updated");
        Ok(part)
    }

    pub async fn get_all_parts(
        &self,
        filter: &PartFilter,
        query: &ListQuery,
    ) -> Result<Page<Part>, AppError> {
        let (rows, count) = self.parts.list(filter, query).await?;
        Ok(Page::new(query, rows, count))
    }

    async fn ensure_exists(&self, id: &PartId) -> Result<(), AppError> {
        match self.parts.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("part {}", id)).into()),
        }
    }
}

fn check_price(value: &Option<String>, field: &str, errors: &mut FieldErrors) -> Option<i64> {
    let cents = provided(value).and_then(parse_price);
    if cents.is_none() {
        errors.set(field, format!("{} cannot be null", field));
    }
    cents
}

fn parse_update(
    id: Option<uuid::Uuid>,
    price: &Option<String>,
    field: &str,
) -> Result<(PartId, i64), AppError> {
    let mut errors = FieldErrors::new();
    if id.is_none() {
        errors.set("id", "id cannot be null");
    }
    let cents = check_price(price, field, &mut errors);
    errors.into_result()?;

    match (id, cents) {
        (Some(id), Some(cents)) => Ok((PartId(id), cents)),
        _ => Err(AppError::Internal("validated price fields missing".into())),
    }
}
