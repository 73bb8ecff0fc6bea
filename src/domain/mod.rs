//! Domain layer - Core business entities and request payloads
//!
//! These types describe what the API exchanges with callers. They are
//! independent of the storage representation in `infra::repositories::entities`.

pub mod category;
pub mod client;
pub mod order;
pub mod password;
pub mod product;
pub mod user;

pub use category::{Category, CreateCategory, UpdateCategory};
pub use client::{Client, CreateClient, UpdateClient};
pub use order::{CreateOrder, CreateOrderItem, Order, OrderProduct, UpdateOrder};
pub use password::Password;
pub use product::{CreateProduct, Product, UpdateProduct};
pub use user::{CreateUser, Login, NewUser, UpdateUser, User};
