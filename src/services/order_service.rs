use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::cart::CartLine,
    dto::orders::{CheckoutRequest, OrderPricing, OrderWithItems},
    entity::{
        line_items::Column as LineItemCol,
        orders::{ActiveModel as OrderActive, Model as OrderModel},
        vouchers::{Model as VoucherModel, VoucherUnit},
        Carts, Foods, LineItems, Orders, Vouchers,
    },
    error::{AppError, AppResult},
    models::Order,
    services::cart_service::{line_item_from_entity, sum_line_items},
    services::food_service::food_from_entity,
    validation,
};

/// Turn a cart into an order: validate the customer fields, then atomically
/// create the order row, re-parent every line item out of the cart, and
/// retire the now-empty cart. No line item rows are created or copied.
pub async fn checkout(
    conn: &DatabaseConnection,
    cart_id: Uuid,
    payload: CheckoutRequest,
) -> AppResult<OrderWithItems> {
    let payment_type = validation::validate_order(&payload).map_err(AppError::Validation)?;

    let txn = conn.begin().await?;

    Carts::find_by_id(cart_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let item_count = LineItems::find()
        .filter(LineItemCol::CartId.eq(cart_id))
        .count(&txn)
        .await?;
    if item_count == 0 {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    if let Some(voucher_id) = payload.voucher_id {
        Vouchers::find_by_id(voucher_id)
            .one(&txn)
            .await?
            .ok_or(AppError::MissingAssociation("voucher"))?;
    }

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        address: Set(payload.address),
        email: Set(payload.email),
        payment_type: Set(payment_type),
        voucher_id: Set(payload.voucher_id),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    let moved = add_line_items(&txn, order.id, cart_id).await?;
    Carts::delete_by_id(cart_id).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!(order_id = %order.id, %cart_id, moved, "checkout completed");

    get_order(conn, order.id).await
}

/// Re-parent every line item of `cart_id` onto `order_id` in place: the
/// cart association is cleared and the order association set on the same
/// rows. Returns how many rows moved.
pub async fn add_line_items<C: ConnectionTrait>(
    conn: &C,
    order_id: Uuid,
    cart_id: Uuid,
) -> AppResult<u64> {
    let result = LineItems::update_many()
        .col_expr(LineItemCol::OrderId, Expr::value(order_id))
        .col_expr(LineItemCol::CartId, Expr::value(None::<Uuid>))
        .filter(LineItemCol::CartId.eq(cart_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Same Σ quantity × food.price formula as the cart.
pub async fn total_price(conn: &DatabaseConnection, order_id: Uuid) -> AppResult<Decimal> {
    sum_line_items(conn, LineItemCol::OrderId.eq(order_id)).await
}

/// Derived amounts for an order. A dangling voucher reference fails fast;
/// an order without a voucher simply gets no discount.
pub async fn price_order(conn: &DatabaseConnection, order_id: Uuid) -> AppResult<OrderPricing> {
    let order = Orders::find_by_id(order_id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    pricing_for(conn, &order).await
}

pub async fn get_order(conn: &DatabaseConnection, order_id: Uuid) -> AppResult<OrderWithItems> {
    let order = Orders::find_by_id(order_id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;

    let rows = LineItems::find()
        .filter(LineItemCol::OrderId.eq(order_id))
        .find_also_related(Foods)
        .all(conn)
        .await?;

    let mut items = Vec::with_capacity(rows.len());
    for (item, food) in rows {
        let food = food.ok_or(AppError::MissingAssociation("food"))?;
        items.push(CartLine {
            line_item: line_item_from_entity(item),
            food: food_from_entity(food),
        });
    }

    let pricing = pricing_for(conn, &order).await?;

    Ok(OrderWithItems {
        order: order_from_entity(order),
        items,
        pricing,
    })
}

/// Cascade: line items first, then the order row.
pub async fn delete_order(conn: &DatabaseConnection, order_id: Uuid) -> AppResult<()> {
    let txn = conn.begin().await?;

    Orders::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    LineItems::delete_many()
        .filter(LineItemCol::OrderId.eq(order_id))
        .exec(&txn)
        .await?;
    Orders::delete_by_id(order_id).exec(&txn).await?;

    txn.commit().await?;
    Ok(())
}

async fn pricing_for(conn: &DatabaseConnection, order: &OrderModel) -> AppResult<OrderPricing> {
    let total_price = sum_line_items(conn, LineItemCol::OrderId.eq(order.id)).await?;

    let discount = match order.voucher_id {
        Some(voucher_id) => {
            let voucher = Vouchers::find_by_id(voucher_id)
                .one(conn)
                .await?
                .ok_or(AppError::MissingAssociation("voucher"))?;
            compute_discount(&voucher, total_price)
        }
        None => Decimal::ZERO,
    };

    // Deliberately unclamped: a discount larger than the total goes negative.
    let final_price = total_price - discount;

    Ok(OrderPricing {
        total_price,
        discount,
        final_price,
    })
}

/// The discount rule: percentage of the total or a flat rupiah amount,
/// clamped to the voucher's cap when one is set.
fn compute_discount(voucher: &VoucherModel, total_price: Decimal) -> Decimal {
    let mut discount = match voucher.unit {
        VoucherUnit::Percent => voucher.amount / Decimal::ONE_HUNDRED * total_price,
        VoucherUnit::Rupiah => voucher.amount,
    };

    if let Some(max_amount) = voucher.max_amount {
        if max_amount < discount {
            discount = max_amount;
        }
    }

    discount
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        name: model.name,
        address: model.address,
        email: model.email,
        payment_type: model.payment_type,
        voucher_id: model.voucher_id,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
