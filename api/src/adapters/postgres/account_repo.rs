//! PostgreSQL adapters for account types, users and sessions

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::{equals_ci, ordered};
use crate::domain::entities::{
    ListQuery, NewSession, NewTypeAccount, NewUser, Resources, Session, TypeAccount,
    TypeAccountId, User, UserId,
};
use crate::domain::ports::{SessionRepository, TypeAccountRepository, UserRepository};
use crate::entity::{sessions, type_accounts, users};
use crate::error::DomainError;

/// PostgreSQL implementation of TypeAccountRepository
pub struct PostgresTypeAccountRepository {
    db: DatabaseConnection,
}

impl PostgresTypeAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TypeAccountRepository for PostgresTypeAccountRepository {
    async fn find_by_id(&self, id: &TypeAccountId) -> Result<Option<TypeAccount>, DomainError> {
        let result = type_accounts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_name(&self, type_name: &str) -> Result<Option<TypeAccount>, DomainError> {
        let result = type_accounts::Entity::find()
            .filter(equals_ci(type_accounts::Column::TypeName, type_name))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, account: &NewTypeAccount) -> Result<TypeAccount, DomainError> {
        let r = &account.resources;
        let model = type_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            type_name: Set(account.type_name.clone()),
            add_company: Set(r.add_company),
            add_part: Set(r.add_part),
            add_analyze: Set(r.add_analyze),
            add_equip: Set(r.add_equip),
            add_entry: Set(r.add_entry),
            add_equip_type: Set(r.add_equip_type),
            tecnico: Set(r.tecnico),
            add_accessories: Set(r.add_accessories),
            add_user: Set(r.add_user),
            add_type_account: Set(r.add_type_account),
            responsible_user: Set(account.responsible_user.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn list(&self, query: &ListQuery) -> Result<(Vec<TypeAccount>, u64), DomainError> {
        let select = type_accounts::Entity::find();

        let count = select
            .clone()
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        // Account types are never edited, creation time stands in for both orderings
        let rows = ordered(
            select,
            query,
            type_accounts::Column::CreatedAt,
            type_accounts::Column::CreatedAt,
        )
        .offset(query.offset())
        .limit(query.limit())
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok((rows.into_iter().map(|m| m.into()).collect(), count))
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            type_account_id: Set(user.type_account_id.0),
            responsible_user: Set(user.responsible_user.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }
}

/// PostgreSQL implementation of SessionRepository
pub struct PostgresSessionRepository {
    db: DatabaseConnection,
}

impl PostgresSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: &NewSession) -> Result<Session, DomainError> {
        let model = sessions::ActiveModel {
            token_hash: Set(session.token_hash.clone()),
            user_id: Set(session.user_id.0),
            expires_at: Set(session.expires_at.fixed_offset()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_token_hash(&self, hash: &str) -> Result<Option<Session>, DomainError> {
        let result = sessions::Entity::find_by_id(hash.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn delete(&self, hash: &str) -> Result<bool, DomainError> {
        let result = sessions::Entity::delete_by_id(hash.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }
}

impl From<type_accounts::Model> for TypeAccount {
    fn from(model: type_accounts::Model) -> Self {
        TypeAccount {
            id: TypeAccountId(model.id),
            type_name: model.type_name,
            resources: Resources {
                add_company: model.add_company,
                add_part: model.add_part,
                add_analyze: model.add_analyze,
                add_equip: model.add_equip,
                add_entry: model.add_entry,
                add_equip_type: model.add_equip_type,
                tecnico: model.tecnico,
                add_accessories: model.add_accessories,
                add_user: model.add_user,
                add_type_account: model.add_type_account,
            },
            responsible_user: model.responsible_user,
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            username: model.username,
            password_hash: model.password_hash,
            type_account_id: TypeAccountId(model.type_account_id),
            responsible_user: model.responsible_user,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Session {
            token_hash: model.token_hash,
            user_id: UserId(model.user_id),
            expires_at: model.expires_at.with_timezone(&Utc),
        }
    }
}
