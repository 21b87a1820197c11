//! PostgreSQL adapter for CompanyRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::{contains_ci, equals_ci, ordered};
use crate::domain::entities::{
    Company, CompanyFilter, CompanyId, ListQuery, NewCompany,
};
use crate::domain::ports::CompanyRepository;
use crate::domain::validation::{only_digits_string, provided};
use crate::entity::companies;
use crate::error::DomainError;

/// PostgreSQL implementation of CompanyRepository
pub struct PostgresCompanyRepository {
    db: DatabaseConnection,
}

impl PostgresCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError> {
        let result = companies::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Company>, DomainError> {
        let result = companies::Entity::find()
            .filter(companies::Column::Cnpj.eq(cnpj))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_razao_social(
        &self,
        razao_social: &str,
    ) -> Result<Option<Company>, DomainError> {
        let result = companies::Entity::find()
            .filter(equals_ci(companies::Column::RazaoSocial, razao_social))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = companies::ActiveModel {
            id: Set(Uuid::new_v4()),
            razao_social: Set(company.razao_social.clone()),
            cnpj: Set(company.cnpj.clone()),
            street: Set(company.street.clone()),
            number: Set(company.number.clone()),
            complement: Set(company.complement.clone()),
            city: Set(company.city.clone()),
            state: Set(company.state.clone()),
            neighborhood: Set(company.neighborhood.clone()),
            reference_point: Set(company.reference_point.clone()),
            zip_code: Set(company.zip_code.clone()),
            telephone: Set(company.telephone.clone()),
            email: Set(company.email.clone()),
            name_contact: Set(company.name_contact.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn list(
        &self,
        filter: &CompanyFilter,
        query: &ListQuery,
    ) -> Result<(Vec<Company>, u64), DomainError> {
        let mut select = companies::Entity::find();
        if let Some(name) = provided(&filter.razao_social) {
            select = select.filter(contains_ci(companies::Column::RazaoSocial, name));
        }
        if let Some(cnpj) = provided(&filter.cnpj) {
            select = select.filter(companies::Column::Cnpj.starts_with(only_digits_string(cnpj)));
        }

        let count = select
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let rows = ordered(
            select,
            query,
            companies::Column::CreatedAt,
            companies::Column::UpdatedAt,
        )
        .offset(query.offset())
        .limit(query.limit())
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok((rows.into_iter().map(|m| m.into()).collect(), count))
    }
}

impl From<companies::Model> for Company {
    fn from(model: companies::Model) -> Self {
        Company {
            id: CompanyId(model.id),
            razao_social: model.razao_social,
            cnpj: model.cnpj,
            street: model.street,
            number: model.number,
            complement: model.complement,
            city: model.city,
            state: model.state,
            neighborhood: model.neighborhood,
            reference_point: model.reference_point,
            zip_code: model.zip_code,
            telephone: model.telephone,
            email: model.email,
            name_contact: model.name_contact,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
