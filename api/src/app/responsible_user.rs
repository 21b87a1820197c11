//! Check of the `responsibleUser` field carried by every write request

use crate::domain::ports::UserRepository;
use crate::domain::validation::FieldErrors;
use crate::error::DomainError;

pub const FIELD: &str = "responsibleUser";

/// Validate the username recorded as author of a write.
///
/// A missing key, an explicit `null` or blank value, and an unknown username
/// each produce their own message. Returns the username when it is valid.
pub async fn check_responsible_user<UR>(
    users: &UR,
    value: &Option<Option<String>>,
    errors: &mut FieldErrors,
) -> Result<Option<String>, DomainError>
where
    UR: UserRepository + ?Sized,
{
    let username = match value {
        None => {
            errors.set(FIELD, "username não está sendo passado.");
            return Ok(None);
        }
        Some(v) => v.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    };

    let Some(username) = username else {
        errors.set(FIELD, "username não pode ser nulo.");
        return Ok(None);
    };

    if users.find_by_username(username).await?.is_none() {
        errors.set(FIELD, "username inválido.");
        return Ok(None);
    }

    Ok(Some(username.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_user_named, InMemoryUserRepository};

    async fn check(value: Option<Option<&str>>) -> (Option<String>, FieldErrors) {
        let users = InMemoryUserRepository::new().with_user(test_user_named("modrp"));
        let mut errors = FieldErrors::new();
        let value = value.map(|v| v.map(str::to_string));
        let result = check_responsible_user(&users, &value, &mut errors)
            .await
            .unwrap();
        (result, errors)
    }

    #[tokio::test]
    async fn known_user_passes() {
        let (username, errors) = check(Some(Some("modrp"))).await;
        assert_eq!(username.as_deref(), Some("modrp"));
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn missing_key() {
        let (username, errors) = check(None).await;
        assert!(username.is_none());
        assert_eq!(
            errors.into_error().message_for(FIELD),
            Some("username não está sendo passado.")
        );
    }

    #[tokio::test]
    async fn null_or_blank() {
        let (_, errors) = check(Some(None)).await;
        assert_eq!(
            errors.into_error().message_for(FIELD),
            Some("username não pode ser nulo.")
        );

        let (_, errors) = check(Some(Some("  "))).await;
        assert_eq!(
            errors.into_error().message_for(FIELD),
            Some("username não pode ser nulo.")
        );
    }

    #[tokio::test]
    async fn unknown_user() {
        let (_, errors) = check(Some(Some("ghost"))).await;
        assert_eq!(
            errors.into_error().message_for(FIELD),
            Some("username inválido.")
        );
    }
}
