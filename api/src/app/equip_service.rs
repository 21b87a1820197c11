//! Equipment unit service

use std::sync::Arc;

use serde_json::Value;

use super::responsible_user::check_responsible_user;
use crate::domain::entities::{
    BadgeType, Equip, EquipDetail, EquipFilter, EquipId, EquipInput, EquipKind, EquipModel,
    EquipPatch, ListQuery, NewEquip, Page, ReaderColor,
};
use crate::domain::ports::{
    CompanyRepository, EquipCatalogRepository, EquipRepository, UserRepository,
};
use crate::domain::validation::{provided, uuid_value, FieldErrors};
use crate::error::{AppError, DomainError};

const INVALID_READER: &str = "leitor inválido.";

/// Service for registering and editing equipment units
pub struct EquipService<QR, CR, ER, UR>
where
    QR: EquipRepository + ?Sized,
    CR: CompanyRepository + ?Sized,
    ER: EquipCatalogRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    equips: Arc<QR>,
    companies: Arc<CR>,
    catalog: Arc<ER>,
    users: Arc<UR>,
}

impl<QR, CR, ER, UR> EquipService<QR, CR, ER, UR>
where
    QR: EquipRepository + ?Sized,
    CR: CompanyRepository + ?Sized,
    ER: EquipCatalogRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    pub fn new(equips: Arc<QR>, companies: Arc<CR>, catalog: Arc<ER>, users: Arc<UR>) -> Self {
        Self {
            equips,
            companies,
            catalog,
            users,
        }
    }

    pub async fn add(&self, input: EquipInput) -> Result<EquipDetail, AppError> {
        let mut errors = FieldErrors::new();

        let equip_model = match &input.equip_model_id {
            None => {
                errors.set("equipModelId", "Por favor selecione o modelo de equipamento.");
                None
            }
            Some(value) => {
                let model = match uuid_value(value) {
                    Some(id) => self.catalog.find_model_by_id(&id.into()).await?,
                    None => None,
                };
                if model.is_none() {
                    errors.set("equipModelId", "Esse tipo de quipamento não existe.");
                }
                model
            }
        };

        let company = match &input.company_id {
            None => {
                errors.set("companyId", "Por favor selecione uma empresa.");
                None
            }
            Some(value) => {
                let company = match uuid_value(value) {
                    Some(id) => self.companies.find_by_id(&id.into()).await?,
                    None => None,
                };
                if company.is_none() {
                    errors.set("companyId", "Essa empresa não existe.");
                }
                company
            }
        };

        let serial_number = provided(&input.serial_number);
        match serial_number {
            None => errors.set("serialNumber", "Por favor informe o número de série."),
            Some(serial) => {
                if self.equips.find_by_serial_number(serial).await?.is_some() {
                    errors.set("serialNumber", "Esse equipamento já está cadastrado.");
                }
            }
        }

        let flags = check_flags(
            [
                flag(&input.proximity),
                flag(&input.bio),
                flag(&input.barcode),
                flag(&input.cartographic),
            ],
            &mut errors,
        );
        let reader_color = check_reader_color(input.reader_color.as_deref(), &mut errors);
        let badge_type = check_badge_type(input.badge_type.as_deref(), &mut errors);

        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        errors.into_result()?;

        let (
            Some(equip_model),
            Some(company),
            Some(serial_number),
            Some([proximity, bio, barcode, cartographic]),
            Some(reader_color),
            Some(badge_type),
            Some(responsible_user),
        ) = (
            equip_model,
            company,
            serial_number,
            flags,
            reader_color,
            badge_type,
            responsible_user,
        )
        else {
            return Err(AppError::Internal("validated equip fields missing".into()));
        };

        let equip = self
            .equips
            .create(&NewEquip {
                company_id: company.id,
                equip_model_id: equip_model.id,
                serial_number: serial_number.to_string(),
                reader_color,
                badge_type,
                details: provided(&input.details).map(str::to_string),
                proximity,
                bio,
                barcode,
                cartographic,
                responsible_user,
            })
            .await?;

        tracing::info!(
            equip_id = %equip.id,
            serial_number = %equip.serial_number,
            company_id = %company.id,
            "Equipment registered"
        );

        Ok(EquipDetail {
            equip,
            company,
            equip_model,
        })
    }

    pub async fn get_all(
        &self,
        filter: &EquipFilter,
        query: &ListQuery,
    ) -> Result<Page<EquipDetail>, AppError> {
        let (rows, count) = self.equips.list(filter, query).await?;

        let mut details = Vec::with_capacity(rows.len());
        for equip in rows {
            details.push(self.detail(equip).await?);
        }

        Ok(Page::new(query, details, count))
    }

    /// Apply `patch` over the stored unit and re-validate the result
    pub async fn update(&self, id: &EquipId, patch: EquipPatch) -> Result<EquipDetail, AppError> {
        let existing = self
            .equips
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("equip {}", id)))?;

        let mut errors = FieldErrors::new();

        let serial_number = match &patch.serial_number {
            None => Some(existing.serial_number.clone()),
            Some(_) => provided(&patch.serial_number).map(str::to_string),
        };
        match serial_number.as_deref() {
            None => errors.set("serialNumber", "informe o número de série."),
            Some(serial) if serial != existing.serial_number => {
                if self.equips.find_by_serial_number(serial).await?.is_some() {
                    errors.set("serialNumber", "já está cadastrado.");
                }
            }
            Some(_) => {}
        }

        let flags = check_flags(
            [
                flag_or(&patch.proximity, existing.proximity),
                flag_or(&patch.bio, existing.bio),
                flag_or(&patch.barcode, existing.barcode),
                flag_or(&patch.cartographic, existing.cartographic),
            ],
            &mut errors,
        );

        let reader_color = match patch.reader_color.as_deref() {
            None => Some(existing.reader_color),
            Some(value) => check_reader_color(Some(value), &mut errors),
        };
        let badge_type = match patch.badge_type.as_deref() {
            None => Some(existing.badge_type),
            Some(value) => check_badge_type(Some(value), &mut errors),
        };

        let equip_model = self.resolve_model(&patch, &mut errors).await?;

        errors.into_result()?;

        let (
            Some(serial_number),
            Some([proximity, bio, barcode, cartographic]),
            Some(reader_color),
            Some(badge_type),
            Some(equip_model),
        ) = (serial_number, flags, reader_color, badge_type, equip_model)
        else {
            return Err(AppError::Internal("validated equip fields missing".into()));
        };

        let details = match &patch.details {
            None => existing.details.clone(),
            Some(_) => provided(&patch.details).map(str::to_string),
        };

        let updated = self
            .equips
            .update(&Equip {
                equip_model_id: equip_model.id,
                serial_number,
                reader_color,
                badge_type,
                details,
                proximity,
                bio,
                barcode,
                cartographic,
                ..existing
            })
            .await?;

        tracing::info!(equip_id = %updated.id, model_id = %equip_model.id, "Equipment updated");

        self.detail(updated).await
    }

    pub async fn get_one_by_serial_number(&self, serial: &str) -> Result<EquipDetail, AppError> {
        let equip = self
            .equips
            .find_by_serial_number(serial)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("equip {}", serial)))?;

        self.detail(equip).await
    }

    /// Type, mark and model must all be named and resolve to a registered model
    async fn resolve_model(
        &self,
        patch: &EquipPatch,
        errors: &mut FieldErrors,
    ) -> Result<Option<EquipModel>, DomainError> {
        let kind = provided(&patch.kind);
        if kind.is_none() {
            errors.set("type", "informe o tipo.");
        }
        let mark = provided(&patch.mark);
        if mark.is_none() {
            errors.set("mark", "informe a marca.");
        }
        let model = provided(&patch.model);
        if model.is_none() {
            errors.set("model", "informe o modelo.");
        }

        let (Some(kind), Some(mark), Some(model)) = (kind, mark, model) else {
            return Ok(None);
        };

        let found = match kind.parse::<EquipKind>() {
            Ok(kind) => match self.catalog.find_mark(kind, mark).await? {
                Some(mark) => self
                    .catalog
                    .find_models_by_name(&mark.id, model)
                    .await?
                    .into_iter()
                    .next(),
                None => None,
            },
            Err(_) => None,
        };

        if found.is_none() {
            errors.set("model", "Modelo não encontrado.");
        }

        Ok(found)
    }

    async fn detail(&self, equip: Equip) -> Result<EquipDetail, AppError> {
        Ok(equip_detail(&*self.companies, &*self.catalog, equip).await?)
    }
}

/// Attach the owning company and the model chain to a unit
pub(crate) async fn equip_detail<CR, ER>(
    companies: &CR,
    catalog: &ER,
    equip: Equip,
) -> Result<EquipDetail, DomainError>
where
    CR: CompanyRepository + ?Sized,
    ER: EquipCatalogRepository + ?Sized,
{
    let company = companies
        .find_by_id(&equip.company_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("company {}", equip.company_id)))?;
    let equip_model = catalog
        .find_model_by_id(&equip.equip_model_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("equip model {}", equip.equip_model_id)))?;

    Ok(EquipDetail {
        equip,
        company,
        equip_model,
    })
}

/// `Some` only for a JSON boolean; strings such as `"sim"` are rejected
fn flag(value: &Option<Value>) -> Option<bool> {
    value.as_ref().and_then(Value::as_bool)
}

/// Patch flag: absent keeps `current`, anything else must be a boolean
fn flag_or(value: &Option<Value>, current: bool) -> Option<bool> {
    match value {
        None => Some(current),
        Some(v) => v.as_bool(),
    }
}

/// proximidade, bio, barras and cartografico must each be a boolean
fn check_flags(values: [Option<bool>; 4], errors: &mut FieldErrors) -> Option<[bool; 4]> {
    const NAMES: [&str; 4] = ["proximidade", "bio", "barras", "cartografico"];

    let mut flags = [false; 4];
    let mut ok = true;
    for (i, value) in values.into_iter().enumerate() {
        match value {
            Some(flag) => flags[i] = flag,
            None => {
                errors.set(NAMES[i], format!("{} não é um booleano", NAMES[i]));
                ok = false;
            }
        }
    }

    ok.then_some(flags)
}

fn check_reader_color(value: Option<&str>, errors: &mut FieldErrors) -> Option<ReaderColor> {
    let parsed = value.and_then(|v| v.parse().ok());
    if parsed.is_none() {
        errors.set("corLeitor", INVALID_READER);
    }
    parsed
}

fn check_badge_type(value: Option<&str>, errors: &mut FieldErrors) -> Option<BadgeType> {
    let parsed = value.and_then(|v| v.parse().ok());
    if parsed.is_none() {
        errors.set("tipoCracha", INVALID_READER);
    }
    parsed
}
