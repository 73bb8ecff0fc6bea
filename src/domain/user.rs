//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Password;
use crate::errors::AppResult;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check a plain text password against the stored hash
    pub async fn verify_password(&self, plain_text: &str) -> bool {
        Password::from_hash(self.password_hash.clone())
            .matches(plain_text.to_string())
            .await
    }
}

/// Registration and user creation payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[validate(length(min = 1, message = "login is required"))]
    pub login: String,
    #[validate(length(
        min = 8,
        message = "Password must be at least 8 characters"
    ))]
    pub password: String,
    #[serde(default)]
    pub phone_number: String,
}

/// Users are updated as a full row, password included
pub type UpdateUser = CreateUser;

impl CreateUser {
    /// Hash the password, producing the row the repository stores.
    pub async fn into_new_user(self) -> AppResult<NewUser> {
        let password_hash = Password::hash(self.password).await?.into_string();

        Ok(NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            login: self.login,
            password_hash,
            phone_number: self.phone_number,
        })
    }
}

/// User fields as written to storage; the password is already hashed
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password_hash: String,
    pub phone_number: String,
}

/// Login payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Login {
    #[validate(length(min = 1, message = "login is required"))]
    pub login: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}
