use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Food, LineItem};

/// One line item joined with the food it references.
#[derive(Debug, Serialize)]
pub struct CartLine {
    pub line_item: LineItem,
    pub food: Food,
}

#[derive(Debug, Serialize)]
pub struct CartContents {
    pub cart_id: Uuid,
    pub items: Vec<CartLine>,
    pub total_price: Decimal,
}
