//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}
//! Tables are created parents first, so `down` unwinds children first.

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_category_table;
mod m20240101_000003_create_client_table;
mod m20240101_000004_create_product_table;
mod m20240101_000005_create_orders_table;
mod m20240101_000006_create_order_products_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_category_table::Migration),
            Box::new(m20240101_000003_create_client_table::Migration),
            Box::new(m20240101_000004_create_product_table::Migration),
            Box::new(m20240101_000005_create_orders_table::Migration),
            Box::new(m20240101_000006_create_order_products_table::Migration),
        ]
    }
}
