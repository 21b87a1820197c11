//! Account service
//!
//! Account types, users, and bearer-token sessions. Passwords are stored as
//! argon2 hashes and tokens as SHA-256 hex digests; the plain token is only
//! returned once, at login.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::responsible_user::check_responsible_user;
use crate::domain::entities::{
    AuthenticatedUser, ListQuery, LoginInput, NewSession, NewTypeAccount, NewUser, Page,
    Resources, TypeAccount, TypeAccountInput, User, UserInput,
};
use crate::domain::ports::{SessionRepository, TypeAccountRepository, UserRepository};
use crate::domain::validation::{provided, FieldErrors};
use crate::error::{AppError, DomainError};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Name of the account type given to the bootstrap administrator
pub const ADMIN_TYPE_NAME: &str = "admin";

/// Returned by a successful login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    pub token: String,
    pub username: String,
    pub type_name: String,
    #[serde(rename = "resource")]
    pub resources: Resources,
}

pub struct AccountService<TR, UR, SR>
where
    TR: TypeAccountRepository + ?Sized,
    UR: UserRepository + ?Sized,
    SR: SessionRepository + ?Sized,
{
    type_accounts: Arc<TR>,
    users: Arc<UR>,
    sessions: Arc<SR>,
    session_ttl: Duration,
}

impl<TR, UR, SR> AccountService<TR, UR, SR>
where
    TR: TypeAccountRepository + ?Sized,
    UR: UserRepository + ?Sized,
    SR: SessionRepository + ?Sized,
{
    pub fn new(
        type_accounts: Arc<TR>,
        users: Arc<UR>,
        sessions: Arc<SR>,
        session_ttl_hours: i64,
    ) -> Self {
        Self {
            type_accounts,
            users,
            sessions,
            session_ttl: Duration::hours(session_ttl_hours),
        }
    }

    pub async fn add_type_account(&self, input: TypeAccountInput) -> Result<TypeAccount, AppError> {
        let mut errors = FieldErrors::new();

        let type_name = provided(&input.type_name);
        match type_name {
            None => errors.set("typeName", "typeName cannot be null"),
            Some(name) => {
                if self.type_accounts.find_by_name(name).await?.is_some() {
                    errors.set("typeName", "typeName already exists");
                }
            }
        }

        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        errors.into_result()?;

        let (Some(type_name), Some(responsible_user)) = (type_name, responsible_user) else {
            return Err(AppError::Internal("validated type account fields missing".into()));
        };

        let account = self
            .type_accounts
            .create(&NewTypeAccount {
                type_name: type_name.to_string(),
                resources: input.resources,
                responsible_user,
            })
            .await?;

        tracing::info!(type_name = %account.type_name, "Account type registered");

        Ok(account)
    }

    pub async fn get_all_type_accounts(
        &self,
        query: &ListQuery,
    ) -> Result<Page<TypeAccount>, AppError> {
        let (rows, count) = self.type_accounts.list(query).await?;
        Ok(Page::new(query, rows, count))
    }

    pub async fn get_resources_by_type_account(
        &self,
        type_name: &str,
    ) -> Result<TypeAccount, AppError> {
        self.type_accounts
            .find_by_name(type_name)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("type account {}", type_name)).into())
    }

    pub async fn add_user(&self, input: UserInput) -> Result<User, AppError> {
        let mut errors = FieldErrors::new();

        let username = provided(&input.username);
        match username {
            None => errors.set("username", "username cannot be null"),
            Some(name) => {
                if self.users.find_by_username(name).await?.is_some() {
                    errors.set("username", "username already exists");
                }
            }
        }

        let password = input.password.as_deref().filter(|p| !p.is_empty());
        match password {
            None => errors.set("password", "password cannot be null"),
            Some(p) if p.chars().count() < MIN_PASSWORD_LEN => errors.set(
                "password",
                format!("password must have at least {} characters", MIN_PASSWORD_LEN),
            ),
            Some(_) => {}
        }

        let type_account = match provided(&input.type_name) {
            None => {
                errors.set("typeName", "typeName cannot be null");
                None
            }
            Some(name) => {
                let account = self.type_accounts.find_by_name(name).await?;
                if account.is_none() {
                    errors.set("typeName", "typeName not found");
                }
                account
            }
        };

        let responsible_user =
            check_responsible_user(&*self.users, &input.responsible_user, &mut errors).await?;

        errors.into_result()?;

        let (Some(username), Some(password), Some(type_account), Some(responsible_user)) =
            (username, password, type_account, responsible_user)
        else {
            return Err(AppError::Internal("validated user fields missing".into()));
        };

        let user = self
            .users
            .create(&NewUser {
                username: username.to_string(),
                password_hash: hash_password(password)?,
                type_account_id: type_account.id,
                responsible_user,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            type_name = %type_account.type_name,
            "User registered"
        );

        Ok(user)
    }

    /// Open a session. Every failure is reported as `Unauthorized`.
    pub async fn login(&self, input: LoginInput) -> Result<LoginSession, AppError> {
        let (Some(username), Some(password)) =
            (provided(&input.username), input.password.as_deref())
        else {
            return Err(AppError::Unauthorized);
        };

        let Some(user) = self.users.find_by_username(username).await? else {
            tracing::debug!(username = %username, "Login for unknown user");
            return Err(AppError::Unauthorized);
        };

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(username = %username, "Login with wrong password");
            return Err(AppError::Unauthorized);
        }

        let type_account = self
            .type_accounts
            .find_by_id(&user.type_account_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let token = generate_token();
        self.sessions
            .create(&NewSession {
                token_hash: hash_token(&token),
                user_id: user.id,
                expires_at: Utc::now() + self.session_ttl,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginSession {
            token,
            username: user.username,
            type_name: type_account.type_name,
            resources: type_account.resources,
        })
    }

    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        if self.sessions.delete(&hash_token(token)).await? {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    /// Resolve a bearer token to its user and account type
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_hash = hash_token(token);
        let session = self
            .sessions
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if session.expires_at <= Utc::now() {
            self.sessions.delete(&token_hash).await?;
            return Err(AppError::Unauthorized);
        }

        let user = self
            .users
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;
        let type_account = self
            .type_accounts
            .find_by_id(&user.type_account_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthenticatedUser { user, type_account })
    }

    /// Create the administrator account type and user unless they already exist
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<User, AppError> {
        if let Some(user) = self.users.find_by_username(username).await? {
            return Ok(user);
        }

        let type_account = match self.type_accounts.find_by_name(ADMIN_TYPE_NAME).await? {
            Some(account) => account,
            None => {
                self.type_accounts
                    .create(&NewTypeAccount {
                        type_name: ADMIN_TYPE_NAME.to_string(),
                        resources: Resources::all(),
                        responsible_user: username.to_string(),
                    })
                    .await?
            }
        };

        let user = self
            .users
            .create(&NewUser {
                username: username.to_string(),
                password_hash: hash_password(password)?,
                type_account_id: type_account.id,
                responsible_user: username.to_string(),
            })
            .await?;

        tracing::info!(username = %user.username, "Bootstrap administrator created");

        Ok(user)
    }
}

/// Random session token
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("sk-{}", hex::encode(bytes))
}

/// Hash a session token for storage
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

/// False for a wrong password or an unreadable hash
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldValidationError;
    use crate::test_utils::{
        test_type_account, test_user_named, InMemorySessionRepository,
        InMemoryTypeAccountRepository, InMemoryUserRepository,
    };

    type TestService = AccountService<
        InMemoryTypeAccountRepository,
        InMemoryUserRepository,
        InMemorySessionRepository,
    >;

    fn create_service(
        type_accounts: InMemoryTypeAccountRepository,
        users: InMemoryUserRepository,
    ) -> TestService {
        AccountService::new(
            Arc::new(type_accounts),
            Arc::new(users),
            Arc::new(InMemorySessionRepository::new()),
            12,
        )
    }

    fn fields(err: AppError) -> FieldValidationError {
        match err {
            AppError::Domain(DomainError::Fields(e)) => e,
            other => panic!("Expected field errors, got {:?}", other),
        }
    }

    fn type_input(name: Option<&str>) -> TypeAccountInput {
        TypeAccountInput {
            type_name: name.map(str::to_string),
            resources: Resources {
                add_company: true,
                add_part: true,
                add_analyze: true,
                ..Default::default()
            },
            responsible_user: Some(Some("modrp".to_string())),
        }
    }

    /// Service with an "Adm" account type and a user holding `password`
    fn service_with_user(username: &str, password: &str) -> TestService {
        let account = test_type_account("Adm");
        let mut user = test_user_named(username);
        user.type_account_id = account.id;
        user.password_hash = hash_password(password).unwrap();
        create_service(
            InMemoryTypeAccountRepository::new().with_type_account(account),
            InMemoryUserRepository::new().with_user(user),
        )
    }

    #[tokio::test]
    async fn add_type_account() {
        let service = create_service(
            InMemoryTypeAccountRepository::new(),
            InMemoryUserRepository::new().with_user(test_user_named("modrp")),
        );

        let account = service.add_type_account(type_input(Some("Adm"))).await.unwrap();
        assert_eq!(account.type_name, "Adm");
        assert!(account.resources.add_company);
        assert!(!account.resources.add_equip);

        let err = fields(
            service
                .add_type_account(type_input(Some("Adm")))
                .await
                .unwrap_err(),
        );
        assert_eq!(err.message_for("typeName"), Some("typeName already exists"));

        for name in [None, Some("")] {
            let err = fields(service.add_type_account(type_input(name)).await.unwrap_err());
            assert_eq!(err.message_for("typeName"), Some("typeName cannot be null"));
        }

        let resources = service.get_resources_by_type_account("Adm").await.unwrap();
        assert!(resources.resources.add_analyze);

        let page = service
            .get_all_type_accounts(&ListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.count, 1);
    }

    #[tokio::test]
    async fn add_user_hashes_password() {
        let account = test_type_account("tecnico");
        let service = create_service(
            InMemoryTypeAccountRepository::new().with_type_account(account.clone()),
            InMemoryUserRepository::new().with_user(test_user_named("modrp")),
        );

        let user = service
            .add_user(UserInput {
                username: Some("joana".to_string()),
                password: Some("segredo1".to_string()),
                type_name: Some("tecnico".to_string()),
                responsible_user: Some(Some("modrp".to_string())),
            })
            .await
            .unwrap();

        assert_eq!(user.type_account_id, account.id);
        assert_ne!(user.password_hash, "segredo1");
        assert!(verify_password("segredo1", &user.password_hash));
    }

    #[tokio::test]
    async fn add_user_validation() {
        let service = create_service(
            InMemoryTypeAccountRepository::new(),
            InMemoryUserRepository::new().with_user(test_user_named("modrp")),
        );

        let err = fields(
            service
                .add_user(UserInput {
                    username: Some("modrp".to_string()),
                    password: Some("123".to_string()),
                    type_name: Some("ghost".to_string()),
                    responsible_user: Some(Some("modrp".to_string())),
                })
                .await
                .unwrap_err(),
        );

        assert_eq!(err.message_for("username"), Some("username already exists"));
        assert_eq!(
            err.message_for("password"),
            Some("password must have at least 6 characters")
        );
        assert_eq!(err.message_for("typeName"), Some("typeName not found"));
    }

    #[tokio::test]
    async fn login_and_authenticate() {
        let service = service_with_user("joana", "segredo1");

        let session = service
            .login(LoginInput {
                username: Some("joana".to_string()),
                password: Some("segredo1".to_string()),
            })
            .await
            .unwrap();

        assert!(session.token.starts_with("sk-"));
        assert_eq!(session.type_name, "Adm");

        let caller = service.authenticate(&session.token).await.unwrap();
        assert_eq!(caller.user.username, "joana");

        service.logout(&session.token).await.unwrap();
        assert!(matches!(
            service.authenticate(&session.token).await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            service.logout(&session.token).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn login_failures_are_unauthorized() {
        let service = service_with_user("joana", "segredo1");

        for (username, password) in [
            (Some("joana"), Some("errada")),
            (Some("ghost"), Some("segredo1")),
            (None, Some("segredo1")),
            (Some("joana"), None),
        ] {
            let result = service
                .login(LoginInput {
                    username: username.map(str::to_string),
                    password: password.map(str::to_string),
                })
                .await;
            assert!(matches!(result, Err(AppError::Unauthorized)));
        }
    }

    #[tokio::test]
    async fn expired_sessions_are_rejected() {
        let account = test_type_account("Adm");
        let mut user = test_user_named("joana");
        user.type_account_id = account.id;
        user.password_hash = hash_password("segredo1").unwrap();
        let service = AccountService::new(
            Arc::new(InMemoryTypeAccountRepository::new().with_type_account(account)),
            Arc::new(InMemoryUserRepository::new().with_user(user)),
            Arc::new(InMemorySessionRepository::new()),
            0,
        );

        let session = service
            .login(LoginInput {
                username: Some("joana".to_string()),
                password: Some("segredo1".to_string()),
            })
            .await
            .unwrap();

        assert!(matches!(
            service.authenticate(&session.token).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let service = create_service(
            InMemoryTypeAccountRepository::new(),
            InMemoryUserRepository::new(),
        );

        let first = service.ensure_admin("root", "rootpass").await.unwrap();
        let second = service.ensure_admin("root", "rootpass").await.unwrap();
        assert_eq!(first.id, second.id);

        let admin = service
            .get_resources_by_type_account(ADMIN_TYPE_NAME)
            .await
            .unwrap();
        assert_eq!(admin.resources, Resources::all());
    }

    #[test]
    fn token_hash_is_stable_hex() {
        let hash = hash_token("sk-abc");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("sk-abc"));
        assert_ne!(hash, hash_token("sk-abd"));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("x", "not-a-hash"));
    }
}
