use std::sync::Arc;

use super::responsible_user::check_responsible_user;
use crate::domain::entities::{Accessory, AccessoryInput, NewAccessory};
use crate::domain::ports::{AccessoryRepository, UserRepository};
use crate::domain::validation::{provided, FieldErrors};
use crate::error::AppError;

/// Service for the accessories that may arrive with a unit
pub struct AccessoryService<AR, UR>
where
    AR: AccessoryRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    accessories: Arc<AR>,
    users: Arc<UR>,
}

impl<AR, UR> AccessoryService<AR, UR>
where
    AR: AccessoryRepository + ?Sized,
    UR: UserRepository + ?Sized,
{
    pub fn new(accessories: Arc<AR>, users: Arc<UR>) -> Self {
        Self { accessories, users }
    }

    pub async fn add(&self, input: AccessoryInput) -> Result<Accessory, AppError> {
        let mut errors = FieldErrors::new();

        let name = provided(&input.name);
        match name {
            None => errors.set("accessories", "Por favor informar o acessório."),
            Some(name) => {
                if self.accessories.find_by_name(name).await?.is_some() {
                    errors.set("accessories", "Acessório já está cadastrado.");
                }
            }
        }

        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        errors.into_result()?;

        let (Some(name), Some(responsible_user)) = (name, responsible_user) else {
            return Err(AppError::Internal("validated accessory fields missing".into()));
        };

        let accessory = self
            .accessories
            .create(&NewAccessory {
                name: name.to_string(),
                responsible_user,
            })
            .await?;

        tracing::info!(accessory_id = %accessory.id, name = %accessory.name, "Accessory registered");

        Ok(accessory)
    }

    pub async fn get_all(&self) -> Result<Vec<Accessory>, AppError> {
        Ok(self.accessories.list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::test_utils::{
        test_accessory, test_user_named, InMemoryAccessoryRepository, InMemoryUserRepository,
    };

    fn create_service(
        accessories: InMemoryAccessoryRepository,
    ) -> AccessoryService<InMemoryAccessoryRepository, InMemoryUserRepository> {
        let users = InMemoryUserRepository::new().with_user(test_user_named("modrp"));
        AccessoryService::new(Arc::new(accessories), Arc::new(users))
    }

    fn input(name: Option<&str>) -> AccessoryInput {
        AccessoryInput {
            name: name.map(str::to_string),
            responsible_user: Some(Some("modrp".to_string())),
        }
    }

    #[tokio::test]
    async fn add_and_list_by_name() {
        let service = create_service(InMemoryAccessoryRepository::new());

        service.add(input(Some("Fonte"))).await.unwrap();
        service.add(input(Some("Cabo"))).await.unwrap();

        let names: Vec<_> = service
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Cabo", "Fonte"]);
    }

    #[tokio::test]
    async fn add_rejects_missing_and_duplicate_names() {
        let service =
            create_service(InMemoryAccessoryRepository::new().with_accessory(test_accessory("Fonte")));

        for (name, message) in [
            (None, "Por favor informar o acessório."),
            (Some("fonte"), "Acessório já está cadastrado."),
        ] {
            match service.add(input(name)).await {
                Err(AppError::Domain(DomainError::Fields(e))) => {
                    assert_eq!(e.message_for("accessories"), Some(message));
                }
                other => panic!("Expected field errors, got {:?}", other),
            }
        }
    }
}
