//! Intake service
//!
//! Records a unit arriving at the shop. Which contact fields are required
//! depends on the delivery method.

use std::sync::Arc;

use serde_json::Value;

use super::equip_service::equip_detail;
use super::responsible_user::check_responsible_user;
use crate::domain::entities::{
    AccessoryId, DeliveryMethod, EntryEquipment, EntryEquipmentDetail, EntryEquipmentFilter,
    EntryEquipmentInput, ListQuery, NewEntryEquipment, Page,
};
use crate::domain::ports::{
    AccessoryRepository, CompanyRepository, EntryEquipmentRepository, EquipCatalogRepository,
    EquipRepository, UserRepository,
};
use crate::domain::validation::{is_valid_cpf, only_digits_string, provided, FieldErrors};
use crate::error::{AppError, DomainError};

const PACKED_MISSING: &str = "Por favor informar se está devidamente embalado.";

/// Repositories the intake service reads and writes
pub struct EntryRepos<NR, QR, CR, ER, AR, UR>
where
    NR: EntryEquipmentRepository + ?Sized,
    QR: EquipRepository + ?Sized,
    CR: CompanyRepository + ?Sized,
    ER: EquipCatalogRepository + ?Sized,
    AR: AccessoryRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    pub entries: Arc<NR>,
    pub equips: Arc<QR>,
    pub companies: Arc<CR>,
    pub catalog: Arc<ER>,
    pub accessories: Arc<AR>,
    pub users: Arc<UR>,
}

pub struct EntryEquipmentService<NR, QR, CR, ER, AR, UR>
where
    NR: EntryEquipmentRepository + ?Sized,
    QR: EquipRepository + ?Sized,
    CR: CompanyRepository + ?Sized,
    ER: EquipCatalogRepository + ?Sized,
    AR: AccessoryRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    repos: EntryRepos<NR, QR, CR, ER, AR, UR>,
}

impl<NR, QR, CR, ER, AR, UR> EntryEquipmentService<NR, QR, CR, ER, AR, UR>
where
    NR: EntryEquipmentRepository + ?Sized,
    QR: EquipRepository + ?Sized,
    CR: CompanyRepository + ?Sized,
    ER: EquipCatalogRepository + ?Sized,
    AR: AccessoryRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    pub fn new(repos: EntryRepos<NR, QR, CR, ER, AR, UR>) -> Self {
        Self { repos }
    }

    pub async fn add(&self, input: EntryEquipmentInput) -> Result<EntryEquipmentDetail, AppError> {
        let mut errors = FieldErrors::new();
        let repos = &self.repos;

        let equip = match provided(&input.serial_number) {
            None => {
                errors.set("serialNumber", "Por favor digite o número de série.");
                None
            }
            Some(serial) => {
                let equip = repos.equips.find_by_serial_number(serial).await?;
                if equip.is_none() {
                    errors.set("serialNumber", "Este equipamento não está registrado.");
                }
                equip
            }
        };

        let external_damage = input.external_damage.as_ref().and_then(Value::as_bool);
        match external_damage {
            None => errors.set("externalDamage", "Selecione sim ou não."),
            Some(true) if provided(&input.details).is_none() => {
                errors.set("details", "Digite os danos externos.")
            }
            Some(_) => {}
        }

        require(&mut errors, &input.defect, "defect", "Por favor informar o defeito.");

        let delivery = provided(&input.delivery).and_then(|d| d.parse::<DeliveryMethod>().ok());
        match delivery {
            None => errors.set("delivery", "Por favor informar como chegou."),
            Some(DeliveryMethod::Client) => {
                require(
                    &mut errors,
                    &input.client_name,
                    "clientName",
                    "Por favor informar o nome do cliente.",
                );
                check_identity(&input, &mut errors);
            }
            Some(DeliveryMethod::Sedex) => {
                require(
                    &mut errors,
                    &input.sender_name,
                    "senderName",
                    "Por favor informar o nome do remetente.",
                );
                check_packed(&input, &mut errors);
                check_address(&input, &mut errors);
            }
            Some(DeliveryMethod::Motoboy) => {
                require(
                    &mut errors,
                    &input.motoboy_name,
                    "motoboyName",
                    "Por favor informar o nome do motoboy.",
                );
                check_identity(&input, &mut errors);
                require(
                    &mut errors,
                    &input.responsible_name,
                    "responsibleName",
                    "Por favor informar o nome do responsável.",
                );
                check_packed(&input, &mut errors);
            }
            Some(DeliveryMethod::ExternalTechnician) => {
                require(
                    &mut errors,
                    &input.technician_name,
                    "technicianName",
                    "Por favor informar o nome do técnico externo.",
                );
                check_packed(&input, &mut errors);
            }
        }

        let accessories: Vec<AccessoryId> = input
            .accessories
            .iter()
            .flatten()
            .map(|id| AccessoryId(*id))
            .collect();
        if !accessories.is_empty() {
            let found = repos.accessories.find_by_ids(&accessories).await?;
            if accessories
                .iter()
                .any(|id| !found.iter().any(|a| a.id == *id))
            {
                errors.set("accessories", "Acessório não encontrado.");
            }
        }

        let responsible_user =
            check_responsible_user(&*repos.users, &input.responsible_user, &mut errors).await?;

        errors.into_result()?;

        let (Some(equip), Some(delivery), Some(responsible_user)) =
            (equip, delivery, responsible_user)
        else {
            return Err(AppError::Internal("validated entry fields missing".into()));
        };

        let text = |value: &Option<String>| provided(value).map(str::to_string);
        let new_entry = NewEntryEquipment {
            equip_id: equip.id,
            external_damage: external_damage.unwrap_or_default(),
            details: text(&input.details),
            defect: text(&input.defect).unwrap_or_default(),
            delivery: Some(delivery),
            client_name: text(&input.client_name),
            rg: text(&input.rg),
            cpf: provided(&input.cpf).map(only_digits_string),
            sender_name: text(&input.sender_name),
            properly_packed: input.properly_packed.as_ref().and_then(Value::as_bool),
            zip_code: provided(&input.zip_code).map(only_digits_string),
            state: text(&input.state),
            city: text(&input.city),
            neighborhood: text(&input.neighborhood),
            street: text(&input.street),
            number: text(&input.number),
            motoboy_name: text(&input.motoboy_name),
            responsible_name: text(&input.responsible_name),
            technician_name: text(&input.technician_name),
            accessories,
            responsible_user,
        };

        let entry = repos.entries.create(&new_entry).await?;

        tracing::info!(
            entry_id = %entry.id,
            equip_id = %equip.id,
            delivery = %delivery,
            "Equipment received"
        );

        let equip = equip_detail(&*repos.companies, &*repos.catalog, equip).await?;

        Ok(EntryEquipmentDetail { entry, equip })
    }

    pub async fn get_all(
        &self,
        filter: &EntryEquipmentFilter,
        query: &ListQuery,
    ) -> Result<Page<EntryEquipmentDetail>, AppError> {
        let (rows, count) = self.repos.entries.list(filter, query).await?;

        let mut details = Vec::with_capacity(rows.len());
        for entry in rows {
            details.push(self.detail(entry).await?);
        }

        Ok(Page::new(query, details, count))
    }

    async fn detail(&self, entry: EntryEquipment) -> Result<EntryEquipmentDetail, AppError> {
        let repos = &self.repos;
        let equip = repos
            .equips
            .find_by_id(&entry.equip_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("equip {}", entry.equip_id)))?;
        let equip = equip_detail(&*repos.companies, &*repos.catalog, equip).await?;

        Ok(EntryEquipmentDetail { entry, equip })
    }
}

fn require(errors: &mut FieldErrors, value: &Option<String>, field: &str, message: &str) {
    if provided(value).is_none() {
        errors.set(field, message);
    }
}

/// RG and a valid CPF of whoever handed the unit over
fn check_identity(input: &EntryEquipmentInput, errors: &mut FieldErrors) {
    require(errors, &input.rg, "RG", "Por favor informar o RG.");
    match provided(&input.cpf) {
        None => errors.set("Cpf", "Por favor informar o Cpf."),
        Some(cpf) if !is_valid_cpf(cpf) => errors.set("Cpf", "Cpf inválido."),
        Some(_) => {}
    }
}

fn check_packed(input: &EntryEquipmentInput, errors: &mut FieldErrors) {
    if input.properly_packed.as_ref().and_then(Value::as_bool).is_none() {
        errors.set("properlyPacked", PACKED_MISSING);
    }
}

fn check_address(input: &EntryEquipmentInput, errors: &mut FieldErrors) {
    require(errors, &input.zip_code, "zipCode", "Por favor informar o Cep.");
    require(errors, &input.state, "state", "Por favor informar o estado.");
    require(errors, &input.city, "city", "Por favor informar a cidade.");
    require(
        errors,
        &input.neighborhood,
        "neighborhood",
        "Por favor informar o bairro.",
    );
    require(errors, &input.street, "street", "Por favor informar a rua.");
    require(errors, &input.number, "number", "Por favor informar o número.");
}
