//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories and the storage facade
//! that hands repositories to the rest of the application.

pub mod db;
pub mod repositories;
pub mod storage;

pub use db::{Database, Migrator};
pub use repositories::{
    CategoryRepository, ClientRepository, OrderRepository, ProductRepository, StorageError,
    StorageResult, UserRepository,
};
pub use storage::{Persistence, Storage};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCategoryRepository, MockClientRepository, MockOrderRepository, MockProductRepository,
    MockUserRepository,
};
