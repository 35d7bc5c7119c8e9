use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::cart::{CartContents, CartLine},
    entity::{
        carts::{ActiveModel as CartActive, Model as CartModel},
        line_items::{
            ActiveModel as LineItemActive, Column as LineItemCol, Model as LineItemModel,
        },
        Carts, Foods, LineItems,
    },
    error::{AppError, AppResult},
    models::{Cart, LineItem},
    services::food_service::food_from_entity,
};

pub async fn create_cart(conn: &DatabaseConnection) -> AppResult<Cart> {
    let cart = CartActive {
        id: Set(Uuid::new_v4()),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;
    Ok(cart_from_entity(cart))
}

/// Find-or-increment: an existing line item for the food gains one unit,
/// otherwise a new line item with quantity 1 is attached to the cart. Runs
/// in a transaction so concurrent adds cannot create duplicate rows.
pub async fn add_food(
    conn: &DatabaseConnection,
    cart_id: Uuid,
    food_id: Uuid,
) -> AppResult<LineItem> {
    let txn = conn.begin().await?;

    Carts::find_by_id(cart_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    Foods::find_by_id(food_id)
        .one(&txn)
        .await?
        .ok_or(AppError::MissingAssociation("food"))?;

    let existing = LineItems::find()
        .filter(LineItemCol::CartId.eq(cart_id))
        .filter(LineItemCol::FoodId.eq(food_id))
        .one(&txn)
        .await?;

    let line_item = match existing {
        Some(item) => {
            let quantity = item.quantity + 1;
            let mut active: LineItemActive = item.into();
            active.quantity = Set(quantity);
            active.update(&txn).await?
        }
        None => {
            LineItemActive {
                id: Set(Uuid::new_v4()),
                food_id: Set(food_id),
                cart_id: Set(Some(cart_id)),
                order_id: Set(None),
                quantity: Set(1),
                created_at: Set(Utc::now().into()),
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;
    tracing::debug!(%cart_id, %food_id, quantity = line_item.quantity, "food added to cart");
    Ok(line_item_from_entity(line_item))
}

/// Σ quantity × food.price over the cart's line items; 0 when empty.
pub async fn total_price(conn: &DatabaseConnection, cart_id: Uuid) -> AppResult<Decimal> {
    sum_line_items(conn, LineItemCol::CartId.eq(cart_id)).await
}

pub async fn list_cart(conn: &DatabaseConnection, cart_id: Uuid) -> AppResult<CartContents> {
    Carts::find_by_id(cart_id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let rows = LineItems::find()
        .filter(LineItemCol::CartId.eq(cart_id))
        .find_also_related(Foods)
        .all(conn)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    let mut total_price = Decimal::ZERO;
    for (item, food) in rows {
        let food = food.ok_or(AppError::MissingAssociation("food"))?;
        total_price += food.price * Decimal::from(item.quantity);
        items.push(CartLine {
            line_item: line_item_from_entity(item),
            food: food_from_entity(food),
        });
    }

    Ok(CartContents {
        cart_id,
        items,
        total_price,
    })
}

/// Cascade: the cart's line items go first, then the cart row, atomically.
pub async fn destroy_cart(conn: &DatabaseConnection, cart_id: Uuid) -> AppResult<()> {
    let txn = conn.begin().await?;

    Carts::find_by_id(cart_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let deleted = LineItems::delete_many()
        .filter(LineItemCol::CartId.eq(cart_id))
        .exec(&txn)
        .await?;
    Carts::delete_by_id(cart_id).exec(&txn).await?;

    txn.commit().await?;
    tracing::debug!(%cart_id, line_items = deleted.rows_affected, "cart destroyed");
    Ok(())
}

pub(crate) async fn sum_line_items<C: ConnectionTrait>(
    conn: &C,
    owner: sea_orm::sea_query::SimpleExpr,
) -> AppResult<Decimal> {
    let rows = LineItems::find()
        .filter(owner)
        .find_also_related(Foods)
        .all(conn)
        .await?;

    let mut total = Decimal::ZERO;
    for (item, food) in rows {
        let food = food.ok_or(AppError::MissingAssociation("food"))?;
        total += food.price * Decimal::from(item.quantity);
    }
    Ok(total)
}

pub(crate) fn cart_from_entity(model: CartModel) -> Cart {
    Cart {
        id: model.id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub(crate) fn line_item_from_entity(model: LineItemModel) -> LineItem {
    LineItem {
        id: model.id,
        food_id: model.food_id,
        cart_id: model.cart_id,
        order_id: model.order_id,
        quantity: model.quantity,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
