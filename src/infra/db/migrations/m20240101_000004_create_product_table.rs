//! Migration: Create product table.
//!
//! A category cannot be deleted while products still reference it.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_category_table::Category;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Product::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Product::Name).string().not_null())
                    .col(ColumnDef::new(Product::CategoryId).uuid().not_null())
                    .col(
                        ColumnDef::new(Product::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Product::Price).double().not_null().default(0.0))
                    .col(ColumnDef::new(Product::Quantity).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Product::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Product::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_category_id")
                            .from(Product::Table, Product::CategoryId)
                            .to(Category::Table, Category::Id)
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_category_id")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Product {
    Table,
    Id,
    Name,
    CategoryId,
    Description,
    Price,
    Quantity,
    CreatedAt,
    UpdatedAt,
}
