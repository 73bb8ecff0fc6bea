//! Migration: Create orders table.

use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_client_table::Client;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Orders::Price).double().not_null().default(0.0))
                    .col(ColumnDef::new(Orders::Status).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_client_id")
                            .from(Orders::Table, Orders::ClientId)
                            .to(Client::Table, Client::Id)
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_client_id")
                    .table(Orders::Table)
                    .col(Orders::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Orders {
    Table,
    Id,
    ClientId,
    Price,
    Status,
    CreatedAt,
    UpdatedAt,
}
