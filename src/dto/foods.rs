use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Food;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub description: String,
    /// Raw form value; parsed and range-checked during validation so a
    /// non-numeric submission surfaces as a field error.
    pub price: String,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub restaurant_id: Uuid,
    pub review_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFoodRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub review_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct FoodList {
    pub items: Vec<Food>,
}
