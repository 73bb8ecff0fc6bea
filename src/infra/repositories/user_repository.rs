//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::base::{delete_by_id, paged, with_search};
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::error::{FoundExt, StorageResult};
use crate::domain::{NewUser, User};
use crate::types::{ListParams, ListResponse};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Passwords arrive already hashed; this layer never sees plain text.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user. A taken login is a unique violation.
    async fn create(&self, user: NewUser) -> StorageResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> StorageResult<User>;

    /// Find user by exact login
    async fn find_by_login(&self, login: &str) -> StorageResult<User>;

    /// Page through users, searching login, first and last name
    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<User>>;

    async fn update(&self, id: Uuid, user: NewUser) -> StorageResult<u64>;

    async fn delete(&self, id: Uuid) -> StorageResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: NewUser) -> StorageResult<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active_model = ActiveModel {
            id: Set(id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            login: Set(user.login),
            password: Set(user.password_hash),
            phone_number: Set(user.phone_number),
            created_at: Set(now),
            updated_at: Set(now),
        };

        UserEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .or_not_found()?;

        Ok(User::from(model))
    }

    async fn find_by_login(&self, login: &str) -> StorageResult<User> {
        let model = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await?
            .or_not_found()?;

        Ok(User::from(model))
    }

    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<User>> {
        let query = with_search(
            UserEntity::find(),
            params,
            [
                (UserEntity, user::Column::Login),
                (UserEntity, user::Column::FirstName),
                (UserEntity, user::Column::LastName),
            ],
        );

        let count = query.clone().count(&self.db).await?;
        let models = paged(
            query
                .order_by_asc(user::Column::CreatedAt)
                .order_by_asc(user::Column::Id),
            params,
        )
        .all(&self.db)
        .await?;

        Ok(ListResponse::new(
            count,
            models.into_iter().map(User::from).collect(),
        ))
    }

    async fn update(&self, id: Uuid, user: NewUser) -> StorageResult<u64> {
        let changes = ActiveModel {
            id: NotSet,
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            login: Set(user.login),
            password: Set(user.password_hash),
            phone_number: Set(user.phone_number),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        };

        let result = UserEntity::update_many()
            .set(changes)
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<u64> {
        delete_by_id::<UserEntity>(&self.db, id).await
    }
}
