//! Authentication service - registration, login and token verification.
//!
//! Passwords are hashed by the domain `Password` value object; this
//! service only orchestrates storage and token issuance.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{CreateUser, Login, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{Storage, StorageError};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, req: CreateUser) -> AppResult<User>;

    /// Check credentials and issue a signed token
    async fn login(&self, req: Login) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Sign an HS256 token for the given user
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
    })
}

/// Concrete implementation of AuthService backed by the storage facade.
pub struct Authenticator<S: Storage + ?Sized> {
    storage: Arc<S>,
    config: Config,
}

impl<S: Storage + ?Sized> Authenticator<S> {
    pub fn new(storage: Arc<S>, config: Config) -> Self {
        Self { storage, config }
    }
}

#[async_trait]
impl<S: Storage + ?Sized> AuthService for Authenticator<S> {
    async fn register(&self, req: CreateUser) -> AppResult<User> {
        let new_user = req.into_new_user().await?;
        let users = self.storage.users();

        let id = users.create(new_user).await.map_err(|e| match e {
            StorageError::UniqueViolation(_) => AppError::conflict("user"),
            other => AppError::from(other),
        })?;

        tracing::info!(user_id = %id, "User registered");
        Ok(users.get_by_id(id).await?)
    }

    async fn login(&self, req: Login) -> AppResult<TokenResponse> {
        let user = self
            .storage
            .users()
            .find_by_login(&req.login)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => AppError::not_found("user"),
                other => AppError::from(other),
            })?;

        if !user.verify_password(&req.password).await {
            return Err(AppError::bad_request("credentials are wrong"));
        }

        tracing::debug!(user_id = %user.id, "Issued access token");
        generate_token(&user, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Password;
    use crate::infra::{
        CategoryRepository, ClientRepository, MockUserRepository, OrderRepository,
        ProductRepository, UserRepository,
    };
    use sea_orm::DbErr;

    /// Storage that only serves the mocked user repository
    struct UsersOnly(Arc<MockUserRepository>);

    impl Storage for UsersOnly {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.0.clone()
        }
        fn categories(&self) -> Arc<dyn CategoryRepository> {
            unimplemented!()
        }
        fn clients(&self) -> Arc<dyn ClientRepository> {
            unimplemented!()
        }
        fn products(&self) -> Arc<dyn ProductRepository> {
            unimplemented!()
        }
        fn orders(&self) -> Arc<dyn OrderRepository> {
            unimplemented!()
        }
    }

    fn service(mock: MockUserRepository) -> Authenticator<UsersOnly> {
        let config = Config::with_secret("test-secret-key-at-least-32-chars!!").unwrap();
        Authenticator::new(Arc::new(UsersOnly(Arc::new(mock))), config)
    }

    fn stored_user(password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ann".into(),
            last_name: "Li".into(),
            login: "ann".into(),
            password_hash: Password::new(password).unwrap().into_string(),
            phone_number: "555-1".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn register_payload() -> CreateUser {
        CreateUser {
            first_name: "Ann".into(),
            last_name: "Li".into(),
            login: "ann".into(),
            password: "correct horse".into(),
            phone_number: "555-1".into(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_before_storing() {
        let user = stored_user("correct horse");
        let id = user.id;

        let mut mock = MockUserRepository::new();
        mock.expect_create()
            .withf(|new_user| {
                new_user.login == "ann" && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(move |_| Ok(id));
        mock.expect_get_by_id()
            .returning(move |_| Ok(user.clone()));

        let registered = service(mock).register(register_payload()).await.unwrap();
        assert_eq!(registered.id, id);
    }

    #[tokio::test]
    async fn test_register_duplicate_login_is_conflict() {
        let mut mock = MockUserRepository::new();
        mock.expect_create()
            .returning(|_| Err(StorageError::UniqueViolation("users_login_key".into())));

        let err = service(mock).register(register_payload()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_database_failure_stays_internal() {
        let mut mock = MockUserRepository::new();
        mock.expect_create()
            .returning(|_| Err(StorageError::Database(DbErr::Custom("down".into()))));

        let err = service(mock).register(register_payload()).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(StorageError::Database(_))));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let user = stored_user("correct horse");
        let id = user.id;

        let mut mock = MockUserRepository::new();
        mock.expect_find_by_login()
            .withf(|login| login == "ann")
            .returning(move |_| Ok(user.clone()));

        let auth = service(mock);
        let token = auth
            .login(Login {
                login: "ann".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, id);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_bad_request() {
        let user = stored_user("correct horse");

        let mut mock = MockUserRepository::new();
        mock.expect_find_by_login()
            .returning(move |_| Ok(user.clone()));

        let err = service(mock)
            .login(Login {
                login: "ann".into(),
                password: "battery staple".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_not_found() {
        let mut mock = MockUserRepository::new();
        mock.expect_find_by_login()
            .returning(|_| Err(StorageError::NotFound));

        let err = service(mock)
            .login(Login {
                login: "ghost".into(),
                password: "whatever1".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let auth = service(MockUserRepository::new());
        assert!(matches!(
            auth.verify_token("not.a.token"),
            Err(AppError::Jwt(_))
        ));
    }
}
