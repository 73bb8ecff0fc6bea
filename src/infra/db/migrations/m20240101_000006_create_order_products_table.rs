//! Migration: Create order_products join table.

use sea_orm_migration::prelude::*;

use super::m20240101_000004_create_product_table::Product;
use super::m20240101_000005_create_orders_table::Orders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderProducts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderProducts::OrderId).uuid().not_null())
                    .col(ColumnDef::new(OrderProducts::ProductId).uuid().not_null())
                    .col(
                        ColumnDef::new(OrderProducts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderProducts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_products_order_id")
                            .from(OrderProducts::Table, OrderProducts::OrderId)
                            .to(Orders::Table, Orders::Id)
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_products_product_id")
                            .from(OrderProducts::Table, OrderProducts::ProductId)
                            .to(Product::Table, Product::Id)
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_products_order_id")
                    .table(OrderProducts::Table)
                    .col(OrderProducts::OrderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderProducts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OrderProducts {
    Table,
    Id,
    OrderId,
    ProductId,
    CreatedAt,
    UpdatedAt,
}
