use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::cart::CartLine;
use crate::models::Order;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub name: String,
    pub address: String,
    pub email: String,
    /// Human-facing payment name: "Cash", "Go Pay", or "Credit Card".
    pub payment_type: String,
    pub voucher_id: Option<Uuid>,
}

/// Derived order amounts. Never stored; recomputed on every read.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPricing {
    pub total_price: Decimal,
    pub discount: Decimal,
    pub final_price: Decimal,
}

#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<CartLine>,
    pub pricing: OrderPricing,
}
