//! Orders and their line items.
//!
//! An order is created empty and filled by attaching products one join
//! row at a time. The two steps are independent calls: an order with zero
//! items is a valid, observable state, and each attach can be retried on
//! its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Client, Product};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_data: Client,
    pub price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub order_products: Vec<OrderProduct>,
}

/// Join row linking one order to one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_data: Product,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrder {
    pub client_id: Uuid,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    #[serde(default)]
    pub status: String,
}

pub type UpdateOrder = CreateOrder;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderItem {
    pub order_id: Uuid,
    pub product_id: Uuid,
}
