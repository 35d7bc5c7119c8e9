use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::foods::{CreateFoodRequest, FoodList, UpdateFoodRequest},
    entity::{
        food_tags::Column as FoodTagCol,
        foods::{ActiveModel as FoodActive, Column as FoodCol, Model as FoodModel},
        line_items::Column as LineItemCol,
        FoodTags, Foods, LineItems,
    },
    error::{AppError, AppResult, ValidationErrors},
    models::Food,
    validation,
};

pub async fn create_food(conn: &DatabaseConnection, payload: CreateFoodRequest) -> AppResult<Food> {
    let price = match validation::validate_food(&payload) {
        Ok(price) => {
            let mut errors = ValidationErrors::new();
            check_name_taken(conn, &payload.name, None, &mut errors).await?;
            errors.into_result()?;
            price
        }
        Err(mut errors) => {
            // Surface the uniqueness failure alongside the field errors.
            if !payload.name.trim().is_empty() {
                check_name_taken(conn, &payload.name, None, &mut errors).await?;
            }
            return Err(AppError::Validation(errors));
        }
    };

    let food = FoodActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(price),
        image_url: Set(payload.image_url),
        category_id: Set(payload.category_id),
        restaurant_id: Set(payload.restaurant_id),
        review_id: Set(payload.review_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;

    tracing::debug!(food_id = %food.id, name = %food.name, "food created");
    Ok(food_from_entity(food))
}

pub async fn update_food(
    conn: &DatabaseConnection,
    id: Uuid,
    payload: UpdateFoodRequest,
) -> AppResult<Food> {
    let existing = Foods::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let price = match validation::validate_food_update(&payload) {
        Ok(price) => {
            let mut errors = ValidationErrors::new();
            if let Some(name) = payload.name.as_deref() {
                check_name_taken(conn, name, Some(id), &mut errors).await?;
            }
            errors.into_result()?;
            price
        }
        Err(errors) => return Err(AppError::Validation(errors)),
    };

    let mut active: FoodActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = price {
        active.price = Set(price);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(Some(category_id));
    }
    if let Some(review_id) = payload.review_id {
        active.review_id = Set(Some(review_id));
    }

    let food = active.update(conn).await?;
    Ok(food_from_entity(food))
}

pub async fn get_food(conn: &DatabaseConnection, id: Uuid) -> AppResult<Food> {
    let food = Foods::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(food_from_entity(food))
}

pub async fn list_foods(conn: &DatabaseConnection) -> AppResult<FoodList> {
    let items = Foods::find()
        .order_by_asc(FoodCol::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(food_from_entity)
        .collect();
    Ok(FoodList { items })
}

/// Foods whose name starts with `letter`, alphabetically. Case-sensitivity
/// follows the storage collation, as the original prefix LIKE did.
pub async fn by_letter(conn: &DatabaseConnection, letter: &str) -> AppResult<Vec<Food>> {
    let items = Foods::find()
        .filter(FoodCol::Name.starts_with(letter))
        .order_by_asc(FoodCol::Name)
        .all(conn)
        .await?
        .into_iter()
        .map(food_from_entity)
        .collect();
    Ok(items)
}

/// Two-phase delete: refuse while any line item still references the food,
/// otherwise drop the tag join rows and the food inside one transaction.
pub async fn delete_food(conn: &DatabaseConnection, id: Uuid) -> AppResult<()> {
    let txn = conn.begin().await?;

    let food = Foods::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let referencing = LineItems::find()
        .filter(LineItemCol::FoodId.eq(id))
        .count(&txn)
        .await?;
    if referencing > 0 {
        tracing::warn!(food_id = %id, referencing, "food deletion blocked by line items");
        return Err(AppError::ReferentialIntegrity("Line Items present".into()));
    }

    FoodTags::delete_many()
        .filter(FoodTagCol::FoodId.eq(id))
        .exec(&txn)
        .await?;
    food.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

async fn check_name_taken(
    conn: &DatabaseConnection,
    name: &str,
    exclude: Option<Uuid>,
    errors: &mut ValidationErrors,
) -> AppResult<()> {
    let mut finder = Foods::find().filter(FoodCol::Name.eq(name));
    if let Some(id) = exclude {
        finder = finder.filter(FoodCol::Id.ne(id));
    }
    if finder.count(conn).await? > 0 {
        errors.add("name", validation::TAKEN);
    }
    Ok(())
}

pub(crate) fn food_from_entity(model: FoodModel) -> Food {
    Food {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        image_url: model.image_url,
        category_id: model.category_id,
        restaurant_id: model.restaurant_id,
        review_id: model.review_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
