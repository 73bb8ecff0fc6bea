//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod category;
pub mod client;
pub mod order;
pub mod order_product;
pub mod product;
pub mod user;
