use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use uuid::Uuid;

use crate::{
    dto::catalog::{
        CreateCategoryRequest, CreateRestaurantRequest, CreateReviewRequest, CreateTagRequest,
    },
    entity::{
        categories::ActiveModel as CategoryActive,
        food_tags::{ActiveModel as FoodTagActive, Column as FoodTagCol},
        restaurants::ActiveModel as RestaurantActive,
        reviews::ActiveModel as ReviewActive,
        tags::{ActiveModel as TagActive, Column as TagCol},
        FoodTags, Foods, Tags,
    },
    error::{AppError, AppResult, ValidationErrors},
    models::{Category, Restaurant, Review, Tag},
    validation,
};

pub async fn create_category(
    conn: &DatabaseConnection,
    payload: CreateCategoryRequest,
) -> AppResult<Category> {
    let mut errors = ValidationErrors::new();
    if payload.name.trim().is_empty() {
        errors.add("name", validation::BLANK);
    }
    errors.into_result()?;

    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;

    Ok(Category {
        id: category.id,
        name: category.name,
        created_at: category.created_at.with_timezone(&Utc),
    })
}

pub async fn create_tag(conn: &DatabaseConnection, payload: CreateTagRequest) -> AppResult<Tag> {
    let mut errors = match validation::validate_tag(&payload.name) {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };
    if !payload.name.trim().is_empty() {
        let taken = Tags::find()
            .filter(TagCol::Name.eq(&payload.name))
            .count(conn)
            .await?;
        if taken > 0 {
            errors.add("name", validation::TAKEN);
        }
    }
    errors.into_result()?;

    let tag = TagActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;

    Ok(Tag {
        id: tag.id,
        name: tag.name,
        created_at: tag.created_at.with_timezone(&Utc),
    })
}

/// Attach a tag to a food. Already-tagged pairs are left alone, so the join
/// table never holds duplicates.
pub async fn tag_food(conn: &DatabaseConnection, food_id: Uuid, tag_id: Uuid) -> AppResult<()> {
    Foods::find_by_id(food_id)
        .one(conn)
        .await?
        .ok_or(AppError::MissingAssociation("food"))?;
    Tags::find_by_id(tag_id)
        .one(conn)
        .await?
        .ok_or(AppError::MissingAssociation("tag"))?;

    let existing = FoodTags::find()
        .filter(FoodTagCol::FoodId.eq(food_id))
        .filter(FoodTagCol::TagId.eq(tag_id))
        .count(conn)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    FoodTagActive {
        food_id: Set(food_id),
        tag_id: Set(tag_id),
    }
    .insert(conn)
    .await?;

    Ok(())
}

pub async fn create_restaurant(
    conn: &DatabaseConnection,
    payload: CreateRestaurantRequest,
) -> AppResult<Restaurant> {
    let mut errors = ValidationErrors::new();
    if payload.name.trim().is_empty() {
        errors.add("name", validation::BLANK);
    }
    errors.into_result()?;

    let restaurant = RestaurantActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        address: Set(payload.address),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;

    Ok(Restaurant {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        created_at: restaurant.created_at.with_timezone(&Utc),
    })
}

pub async fn create_review(
    conn: &DatabaseConnection,
    payload: CreateReviewRequest,
) -> AppResult<Review> {
    let mut errors = ValidationErrors::new();
    if payload.title.trim().is_empty() {
        errors.add("title", validation::BLANK);
    }
    errors.into_result()?;

    let review = ReviewActive {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        body: Set(payload.body),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;

    Ok(Review {
        id: review.id,
        title: review.title,
        body: review.body,
        created_at: review.created_at.with_timezone(&Utc),
    })
}
