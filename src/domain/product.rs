//! Catalog product, always returned with its category embedded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub category_data: Category,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i32,
}

pub type UpdateProduct = CreateProduct;
