//! Client repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::base::{delete_by_id, paged, with_search};
use super::entities::client::{self, ActiveModel, Entity as ClientEntity};
use super::error::{FoundExt, StorageResult};
use crate::domain::{Client, CreateClient, UpdateClient};
use crate::types::{ListParams, ListResponse};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Client repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a client, returning its generated id
    async fn create(&self, req: CreateClient) -> StorageResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Client>;

    /// Page through clients, searching first name, last name and phone number
    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<Client>>;

    async fn update(&self, id: Uuid, req: UpdateClient) -> StorageResult<u64>;

    async fn delete(&self, id: Uuid) -> StorageResult<u64>;
}

/// Concrete implementation of ClientRepository
pub struct ClientStore {
    db: DatabaseConnection,
}

impl ClientStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for ClientStore {
    async fn create(&self, req: CreateClient) -> StorageResult<Uuid> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let active_model = ActiveModel {
            id: Set(id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            phone_number: Set(req.phone_number),
            created_at: Set(now),
            updated_at: Set(now),
        };

        ClientEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Client> {
        let model = ClientEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .or_not_found()?;

        Ok(Client::from(model))
    }

    async fn get_list(&self, params: &ListParams) -> StorageResult<ListResponse<Client>> {
        let query = with_search(
            ClientEntity::find(),
            params,
            [
                (ClientEntity, client::Column::FirstName),
                (ClientEntity, client::Column::LastName),
                (ClientEntity, client::Column::PhoneNumber),
            ],
        );

        let count = query.clone().count(&self.db).await?;
        let models = paged(
            query
                .order_by_asc(client::Column::CreatedAt)
                .order_by_asc(client::Column::Id),
            params,
        )
        .all(&self.db)
        .await?;

        Ok(ListResponse::new(
            count,
            models.into_iter().map(Client::from).collect(),
        ))
    }

    async fn update(&self, id: Uuid, req: UpdateClient) -> StorageResult<u64> {
        let changes = ActiveModel {
            id: NotSet,
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            phone_number: Set(req.phone_number),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        };

        let result = ClientEntity::update_many()
            .set(changes)
            .filter(client::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: Uuid) -> StorageResult<u64> {
        delete_by_id::<ClientEntity>(&self.db, id).await
    }
}
