//! Order database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Client, Order};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProduct,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Combine with the joined client row; line items are attached afterwards
    pub fn with_client(self, client: super::client::Model) -> Order {
        Order {
            id: self.id,
            client_id: self.client_id,
            client_data: Client::from(client),
            price: self.price,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            order_products: Vec::new(),
        }
    }
}
