//! Repository layer - Data access abstraction
//!
//! One repository per table. Each is a trait (mockable in tests) backed by
//! a `*Store` that talks to the database through SeaORM.

mod base;
mod category_repository;
mod client_repository;
pub(crate) mod entities;
mod error;
mod order_repository;
mod product_repository;
mod user_repository;

pub use category_repository::{CategoryRepository, CategoryStore};
pub use client_repository::{ClientRepository, ClientStore};
pub use error::{FoundExt, StorageError, StorageResult};
pub use order_repository::{OrderRepository, OrderStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use category_repository::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use client_repository::MockClientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use order_repository::MockOrderRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
