//! User service

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::errors::{Result, VenueError};
use crate::storage::{NewUser, SeaOrmStorage, User};

/// `POST /users` 请求体
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// 演示用户（seed --demo-users）
pub const DEMO_USERS: [(&str, &str, &str); 3] = [
    ("John", "Doe", "john.doe@example.com"),
    ("Jane", "Smith", "jane.smith@example.com"),
    ("Bob", "Johnson", "bob.johnson@example.com"),
];

/// 简单格式校验：local@domain.tld
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(VenueError::validation("Name is required"));
        }

        let email = self
            .email
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_lowercase();
        if !is_valid_email(&email) {
            return Err(VenueError::validation(format!(
                "Invalid email address: '{}'",
                email
            )));
        }

        let last_name = self
            .last_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(NewUser {
            name: name.to_string(),
            last_name,
            email,
        })
    }
}

pub struct UserService {
    storage: Arc<SeaOrmStorage>,
}

impl UserService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.storage.list_users().await
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<User> {
        let new_user = request.validate()?;

        if self
            .storage
            .find_user_by_email(&new_user.email)
            .await?
            .is_some()
        {
            return Err(VenueError::conflict(format!(
                "User with email {} already exists",
                new_user.email
            )));
        }

        self.storage.create_user(new_user).await
    }

    /// 按 email upsert 三个演示用户
    pub async fn seed_demo_users(&self) -> Result<usize> {
        for (name, last_name, email) in DEMO_USERS {
            self.storage
                .upsert_user_by_email(NewUser {
                    name: name.to_string(),
                    last_name: Some(last_name.to_string()),
                    email: email.to_string(),
                })
                .await?;
        }
        info!("Seeded {} demo users", DEMO_USERS.len());
        Ok(DEMO_USERS.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>, email: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            name: name.map(String::from),
            last_name: None,
            email: email.map(String::from),
        }
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("john.doe@example.com"));
        assert!(!is_valid_email("no-at.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn test_validate_trims_and_lowercases() {
        let user = CreateUserRequest {
            name: Some("  Ada ".into()),
            last_name: Some("  ".into()),
            email: Some(" Ada@Example.COM ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.last_name.is_none());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let err = request(None, Some("a@b.co")).validate().unwrap_err();
        assert!(matches!(err, VenueError::Validation(_)));

        let err = request(Some("Ada"), None).validate().unwrap_err();
        assert!(matches!(err, VenueError::Validation(_)));
    }
}
