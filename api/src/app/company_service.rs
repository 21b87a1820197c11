//! Company service
//!
//! Registers customers after checking documents, contact data and the CEP.

use std::sync::Arc;

use crate::domain::entities::{Company, CompanyFilter, CompanyInput, ListQuery, NewCompany, Page};
use crate::domain::ports::{CompanyRepository, ZipCodeLookup};
use crate::domain::validation::{
    is_valid_cnpj, is_valid_cpf, is_valid_email, is_valid_phone, is_valid_zip,
    only_digits_string, provided, FieldErrors,
};
use crate::error::{AppError, DomainError};

/// Service for managing companies
pub struct CompanyService<CR, ZL>
where
    CR: CompanyRepository + ?Sized,
    ZL: ZipCodeLookup + ?Sized,
{
    companies: Arc<CR>,
    zip_lookup: Arc<ZL>,
}

impl<CR, ZL> CompanyService<CR, ZL>
where
    CR: CompanyRepository + ?Sized,
    ZL: ZipCodeLookup + ?Sized,
{
    pub fn new(companies: Arc<CR>, zip_lookup: Arc<ZL>) -> Self {
        Self {
            companies,
            zip_lookup,
        }
    }

    /// Validate every field and register the company
    pub async fn add(&self, input: CompanyInput) -> Result<Company, AppError> {
        let mut errors = FieldErrors::new();

        match provided(&input.razao_social) {
            None => errors.set("razaoSocial", "Por favor informar a razão social."),
            Some(name) => {
                if self.companies.find_by_razao_social(name).await?.is_some() {
                    errors.set(
                        "razaoSocial",
                        "Essa razão social já existe em nosso sistema.",
                    );
                }
            }
        }

        let cnpj = provided(&input.cnpj).map(only_digits_string);
        match cnpj.as_deref() {
            None => errors.set("cnpj", "Por favor informar o cnpj ou cpf."),
            Some(document) => {
                if !is_valid_cnpj(document) && !is_valid_cpf(document) {
                    errors.set("cnpj", "O cnpj ou o cpf informado não é válido.");
                }
                if !errors.has("cnpj") && self.companies.find_by_cnpj(document).await?.is_some() {
                    errors.set(
                        "cnpj",
                        "O cnpj ou cpf infomardo já existem em nosso sistema.",
                    );
                }
            }
        }

        require(&mut errors, &input.street, "street", "Por favor informar o nome da rua.");

        match provided(&input.email) {
            None => errors.set("email", "por favor informar o e-mail"),
            Some(email) if !is_valid_email(email) => {
                errors.set("email", "O e-mail informado está inválido.")
            }
            Some(_) => {}
        }

        match provided(&input.number) {
            None => errors.set("number", "Por favor informar o número."),
            Some(number) if !number.chars().all(|c| c.is_ascii_digit()) => {
                errors.set("number", "O número informado é inválido.")
            }
            Some(_) => {}
        }

        require(&mut errors, &input.city, "city", "Por favor informar a cidade.");
        require(&mut errors, &input.state, "state", "Por favor informar o estado.");
        require(
            &mut errors,
            &input.neighborhood,
            "neighborhood",
            "Por favor informar o bairro.",
        );

        let zip_code = provided(&input.zip_code).map(only_digits_string);
        match zip_code.as_deref() {
            None => errors.set("zipCode", "Por favor informar o CEP."),
            Some(zip) if !is_valid_zip(zip) => errors.set("zipCode", "Cep inválido."),
            Some(zip) => {
                if self.zip_lookup.lookup(zip).await?.is_none() {
                    errors.set("zipCode", "Cep inválido.");
                }
            }
        }

        let telephone = provided(&input.telephone).map(only_digits_string);
        match telephone.as_deref() {
            None => errors.set(
                "telphone",
                "Por favor informar o número de telefone para contato.",
            ),
            Some(phone) if !is_valid_phone(phone) => {
                errors.set("telphone", "O telefone informado está inválido.")
            }
            Some(_) => {}
        }

        require(
            &mut errors,
            &input.name_contact,
            "nameContact",
            "Por favor informar o nome para contato.",
        );

        errors.into_result()?;

        let new_company = NewCompany {
            razao_social: text(&input.razao_social),
            cnpj: cnpj.unwrap_or_default(),
            street: text(&input.street),
            number: text(&input.number),
            complement: provided(&input.complement).map(str::to_string),
            city: text(&input.city),
            state: text(&input.state),
            neighborhood: text(&input.neighborhood),
            reference_point: provided(&input.reference_point).map(str::to_string),
            zip_code: zip_code.unwrap_or_default(),
            telephone: telephone.unwrap_or_default(),
            email: text(&input.email),
            name_contact: text(&input.name_contact),
        };

        let company = self.companies.create(&new_company).await?;
        tracing::info!(company_id = %company.id, cnpj = %company.cnpj, "Company registered");

        Ok(company)
    }

    pub async fn get_all(
        &self,
        filter: &CompanyFilter,
        query: &ListQuery,
    ) -> Result<Page<Company>, AppError> {
        let (rows, count) = self.companies.list(filter, query).await?;
        Ok(Page::new(query, rows, count))
    }

    /// Exact lookup by document; punctuation in `cnpj` is ignored
    pub async fn get_one_by_cnpj(&self, cnpj: &str) -> Result<Company, AppError> {
        let digits = only_digits_string(cnpj);
        self.companies
            .find_by_cnpj(&digits)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("company {}", cnpj)).into())
    }
}

fn require(errors: &mut FieldErrors, value: &Option<String>, field: &str, message: &str) {
    if provided(value).is_none() {
        errors.set(field, message);
    }
}

fn text(value: &Option<String>) -> String {
    provided(value).unwrap_or_default().to_string()
}
