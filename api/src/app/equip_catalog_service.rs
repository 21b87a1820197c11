//! Equipment catalog service
//!
//! Maintains the type -> mark -> model classification. Types are a fixed
//! set and their rows are created on first use.

use std::sync::Arc;

use super::responsible_user::check_responsible_user;
use crate::domain::entities::{
    CatalogInput, EquipKind, EquipMark, EquipModel, EquipModelFilter, ListQuery, MarkInput,
    ModelInput, NewEquipMark, NewEquipModel, Page,
};
use crate::domain::ports::{EquipCatalogRepository, UserRepository};
use crate::domain::validation::{provided, FieldErrors};
use crate::error::{AppError, DomainError, FieldValidationError};

const DUPLICATE_MODEL: &str = "Este equipamento já está registrado.";

pub struct EquipCatalogService<ER, UR>
where
    ER: EquipCatalogRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    catalog: Arc<ER>,
    users: Arc<UR>,
}

impl<ER, UR> EquipCatalogService<ER, UR>
where
    ER: EquipCatalogRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    pub fn new(catalog: Arc<ER>, users: Arc<UR>) -> Self {
        Self { catalog, users }
    }

    /// Register a mark under a type
    pub async fn add_mark(&self, input: MarkInput) -> Result<EquipMark, AppError> {
        let mut errors = FieldErrors::new();

        let kind = check_kind(&input.kind, &mut errors);
        let mark = provided(&input.mark);
        if mark.is_none() {
            errors.set("mark", "Por favor informar a marca do equipamento.");
        }
        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        if let (Some(kind), Some(mark)) = (kind, mark) {
            if self.catalog.find_mark(kind, mark).await?.is_some() {
                errors.set("mark", "Marca já está cadastrada.");
            }
        }

        errors.into_result()?;

        let (Some(kind), Some(mark), Some(responsible_user)) = (kind, mark, responsible_user)
        else {
            return Err(AppError::Internal("validated mark fields missing".into()));
        };

        let equip_type = self.catalog.find_or_create_type(kind).await?;
        let created = self
            .catalog
            .create_mark(&NewEquipMark {
                equip_type_id: equip_type.id,
                mark: mark.to_string(),
                responsible_user,
            })
            .await?;

        tracing::info!(mark_id = %created.id, kind = %kind, mark = %created.mark, "Mark registered");

        Ok(created)
    }

    /// Register a model under an existing mark
    pub async fn add_model(&self, input: ModelInput) -> Result<EquipModel, AppError> {
        let mut errors = FieldErrors::new();

        let mark = match input.equip_mark_id {
            None => {
                errors.set("equipMarkId", "Por favor informar a marca do equipamento.");
                None
            }
            Some(id) => {
                let mark = self.catalog.find_mark_by_id(&id.into()).await?;
                if mark.is_none() {
                    errors.set("mark", "Marca não existe.");
                }
                mark
            }
        };

        let model = provided(&input.model);
        if model.is_none() {
            errors.set("model", "Por favor informar o modelo do equipamento.");
        }
        let description = provided(&input.description).unwrap_or_default();

        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        if let (Some(mark), Some(model)) = (&mark, model) {
            if self.is_duplicate_model(mark, model, description).await? {
                errors.set("equipType", DUPLICATE_MODEL);
            }
        }

        errors.into_result()?;

        let (Some(mark), Some(model), Some(responsible_user)) = (mark, model, responsible_user)
        else {
            return Err(AppError::Internal("validated model fields missing".into()));
        };

        self.create_model(&mark, model, description, responsible_user)
            .await
    }

    /// Register type, mark and model in one call, reusing the mark when it exists
    pub async fn add(&self, input: CatalogInput) -> Result<EquipModel, AppError> {
        let mut errors = FieldErrors::new();

        let kind = check_kind(&input.kind, &mut errors);
        let mark_name = provided(&input.mark);
        if mark_name.is_none() {
            errors.set("mark", "Por favor informar a marca do equipamento.");
        }
        let model = provided(&input.model);
        if model.is_none() {
            errors.set("model", "Por favor informar o modelo do equipamento.");
        }
        if input.description.is_none() {
            errors.set("description", "property description is required");
        }
        let description = input.description.as_deref().map(str::trim).unwrap_or_default();

        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        let existing_mark = match (kind, mark_name) {
            (Some(kind), Some(mark_name)) => self.catalog.find_mark(kind, mark_name).await?,
            _ => None,
        };

        if let (Some(mark), Some(model)) = (&existing_mark, model) {
            if self.is_duplicate_model(mark, model, description).await? {
                errors.set("equipType", DUPLICATE_MODEL);
            }
        }

        errors.into_result()?;

        let (Some(kind), Some(mark_name), Some(model), Some(responsible_user)) =
            (kind, mark_name, model, responsible_user)
        else {
            return Err(AppError::Internal("validated catalog fields missing".into()));
        };

        let mark = match existing_mark {
            Some(mark) => mark,
            None => {
                let equip_type = self.catalog.find_or_create_type(kind).await?;
                self.catalog
                    .create_mark(&NewEquipMark {
                        equip_type_id: equip_type.id,
                        mark: mark_name.to_string(),
                        responsible_user: responsible_user.clone(),
                    })
                    .await?
            }
        };

        self.create_model(&mark, model, description, responsible_user)
            .await
    }

    pub async fn get_all(
        &self,
        filter: &EquipModelFilter,
        query: &ListQuery,
    ) -> Result<Page<EquipModel>, AppError> {
        let (rows, count) = self.catalog.list_models(filter, query).await?;
        Ok(Page::new(query, rows, count))
    }

    pub async fn get_all_mark_by_type(&self, kind: &str) -> Result<Vec<EquipMark>, AppError> {
        let kind = parse_kind(kind)?;
        Ok(self.catalog.list_marks_by_type(kind).await?)
    }

    pub async fn get_all_model_by_mark(
        &self,
        kind: &str,
        mark: &str,
    ) -> Result<Vec<EquipModel>, AppError> {
        let kind = parse_kind(kind)?;
        Ok(self.catalog.list_models_by_mark(kind, mark).await?)
    }

    /// Model names repeat only for `peca`, and then only with distinct descriptions
    async fn is_duplicate_model(
        &self,
        mark: &EquipMark,
        model: &str,
        description: &str,
    ) -> Result<bool, DomainError> {
        let same_name = self.catalog.find_models_by_name(&mark.id, model).await?;
        if mark.equip_type.kind == EquipKind::Part {
            Ok(same_name.iter().any(|m| m.description == description))
        } else {
            Ok(!same_name.is_empty())
        }
    }

    async fn create_model(
        &self,
        mark: &EquipMark,
        model: &str,
        description: &str,
        responsible_user: String,
    ) -> Result<EquipModel, AppError> {
        let created = self
            .catalog
            .create_model(&NewEquipModel {
                equip_mark_id: mark.id,
                model: model.to_string(),
                description: description.to_string(),
                responsible_user,
            })
            .await?;

        tracing::info!(
            model_id = %created.id,
            mark = %mark.mark,
            model = %created.model,
            "Model registered"
        );

        Ok(created)
    }
}

fn check_kind(value: &Option<String>, errors: &mut FieldErrors) -> Option<EquipKind> {
    match provided(value) {
        None => {
            errors.set("type", "Por favor informar o tipo do equipamento.");
            None
        }
        Some(kind) => match kind.parse() {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.set("type", "Tipo inválido.");
                None
            }
        },
    }
}

fn parse_kind(value: &str) -> Result<EquipKind, AppError> {
    value
        .parse()
        .map_err(|_| FieldValidationError::single("type", "Tipo inválido.").into())
}
