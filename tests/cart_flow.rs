mod common;

use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

use food_ordering_core::{
    entity::LineItems,
    error::AppError,
    services::{cart_service, food_service},
};

#[tokio::test]
async fn empty_cart_totals_zero() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let cart = cart_service::create_cart(&conn).await?;

    assert_eq!(cart_service::total_price(&conn, cart.id).await?, dec!(0));
    Ok(())
}

#[tokio::test]
async fn adding_a_new_food_creates_one_line_item_with_quantity_one() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let restaurant_id = common::seed_restaurant(&conn).await?;
    let food = food_service::create_food(
        &conn,
        common::food_request("Dimsum", "10000.0", restaurant_id),
    )
    .await?;
    let cart = cart_service::create_cart(&conn).await?;

    let before = LineItems::find().count(&conn).await?;
    let line_item = cart_service::add_food(&conn, cart.id, food.id).await?;
    let after = LineItems::find().count(&conn).await?;

    assert_eq!(after, before + 1);
    assert_eq!(line_item.quantity, 1);
    assert_eq!(line_item.cart_id, Some(cart.id));
    assert_eq!(
        cart_service::total_price(&conn, cart.id).await?,
        food.price
    );
    Ok(())
}

#[tokio::test]
async fn adding_the_same_food_increments_instead_of_duplicating() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let restaurant_id = common::seed_restaurant(&conn).await?;
    let food = food_service::create_food(
        &conn,
        common::food_request("Dimsum", "10000.0", restaurant_id),
    )
    .await?;
    let cart = cart_service::create_cart(&conn).await?;

    cart_service::add_food(&conn, cart.id, food.id).await?;
    let before = LineItems::find().count(&conn).await?;
    let line_item = cart_service::add_food(&conn, cart.id, food.id).await?;
    let after = LineItems::find().count(&conn).await?;

    assert_eq!(after, before, "no new line item for a repeated food");
    assert_eq!(line_item.quantity, 2);
    Ok(())
}

#[tokio::test]
async fn total_price_sums_quantity_times_price() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let restaurant_id = common::seed_restaurant(&conn).await?;
    let soto = food_service::create_food(
        &conn,
        common::food_request("Soto Betawi", "10000.0", restaurant_id),
    )
    .await?;
    let sate = food_service::create_food(
        &conn,
        common::food_request("Sate Ayam", "20000.0", restaurant_id),
    )
    .await?;
    let cart = cart_service::create_cart(&conn).await?;

    cart_service::add_food(&conn, cart.id, soto.id).await?;
    cart_service::add_food(&conn, cart.id, sate.id).await?;
    cart_service::add_food(&conn, cart.id, sate.id).await?;

    assert_eq!(
        cart_service::total_price(&conn, cart.id).await?,
        dec!(50000)
    );

    let contents = cart_service::list_cart(&conn, cart.id).await?;
    assert_eq!(contents.items.len(), 2);
    assert_eq!(contents.total_price, dec!(50000));
    Ok(())
}

#[tokio::test]
async fn destroying_a_cart_deletes_its_line_items() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let restaurant_id = common::seed_restaurant(&conn).await?;
    let bakso = food_service::create_food(
        &conn,
        common::food_request("Bakso", "8000.0", restaurant_id),
    )
    .await?;
    let mie = food_service::create_food(
        &conn,
        common::food_request("Mie Ayam", "9000.0", restaurant_id),
    )
    .await?;
    let cart = cart_service::create_cart(&conn).await?;

    cart_service::add_food(&conn, cart.id, bakso.id).await?;
    cart_service::add_food(&conn, cart.id, mie.id).await?;

    let before = LineItems::find().count(&conn).await?;
    cart_service::destroy_cart(&conn, cart.id).await?;
    let after = LineItems::find().count(&conn).await?;

    assert_eq!(before - after, 2, "cascade must remove both line items");

    let err = cart_service::list_cart(&conn, cart.id)
        .await
        .expect_err("destroyed cart must be gone");
    assert!(matches!(err, AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn adding_an_unknown_food_fails_fast() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let cart = cart_service::create_cart(&conn).await?;

    let err = cart_service::add_food(&conn, cart.id, uuid::Uuid::new_v4())
        .await
        .expect_err("unknown food must fail");
    assert!(matches!(err, AppError::MissingAssociation("food")));
    Ok(())
}
