//! Product database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Category, Product};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub quantity: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::order_product::Entity")]
    OrderProduct,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::order_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Combine with the joined category row
    pub fn with_category(self, category: super::category::Model) -> Product {
        Product {
            id: self.id,
            name: self.name,
            category_id: self.category_id,
            category_data: Category::from(category),
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
