//! Client database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Client;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Client {
    fn from(model: Model) -> Self {
        Client {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            phone_number: model.phone_number,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
