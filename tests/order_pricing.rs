mod common;

use rust_decimal_macros::dec;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

use food_ordering_core::{
    dto::orders::CheckoutRequest,
    dto::vouchers::CreateVoucherRequest,
    entity::vouchers::VoucherUnit,
    entity::{LineItems, Vouchers},
    error::AppError,
    services::{cart_service, food_service, order_service, voucher_service},
};

fn checkout_request(voucher_id: Option<Uuid>) -> CheckoutRequest {
    CheckoutRequest {
        name: "Butet Manurung".into(),
        address: "Jl. Pegangsaan Timur 56".into(),
        email: "butet@example.com".into(),
        payment_type: "Go Pay".into(),
        voucher_id,
    }
}

/// Seeds a cart worth 50000: one 10000 food and two of a 20000 food.
async fn seed_cart(conn: &DatabaseConnection) -> anyhow::Result<Uuid> {
    let restaurant_id = common::seed_restaurant(conn).await?;
    let nasi = food_service::create_food(
        conn,
        common::food_request(&format!("Nasi Uduk {}", Uuid::new_v4()), "10000.0", restaurant_id),
    )
    .await?;
    let sate = food_service::create_food(
        conn,
        common::food_request(&format!("Sate Ayam {}", Uuid::new_v4()), "20000.0", restaurant_id),
    )
    .await?;
    let cart = cart_service::create_cart(conn).await?;
    cart_service::add_food(conn, cart.id, nasi.id).await?;
    cart_service::add_food(conn, cart.id, sate.id).await?;
    cart_service::add_food(conn, cart.id, sate.id).await?;
    Ok(cart.id)
}

#[tokio::test]
async fn checkout_reparents_line_items_and_retires_the_cart() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let cart_id = seed_cart(&conn).await?;

    let line_item_ids: Vec<Uuid> = cart_service::list_cart(&conn, cart_id)
        .await?
        .items
        .into_iter()
        .map(|line| line.line_item.id)
        .collect();
    let before = LineItems::find().count(&conn).await?;

    let result = order_service::checkout(&conn, cart_id, checkout_request(None)).await?;

    // Same rows, new owner: no line items were created or copied.
    let after = LineItems::find().count(&conn).await?;
    assert_eq!(before, after);
    for line in &result.items {
        assert!(line_item_ids.contains(&line.line_item.id));
        assert_eq!(line.line_item.order_id, Some(result.order.id));
        assert_eq!(line.line_item.cart_id, None);
    }

    // The cart is gone after checkout.
    let err = cart_service::list_cart(&conn, cart_id)
        .await
        .expect_err("cart must be destroyed by checkout");
    assert!(matches!(err, AppError::NotFound));

    assert_eq!(result.pricing.total_price, dec!(50000));
    assert_eq!(result.pricing.discount, dec!(0));
    assert_eq!(result.pricing.final_price, dec!(50000));
    Ok(())
}

#[tokio::test]
async fn percent_voucher_discounts_a_share_of_the_total() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let voucher = voucher_service::create_voucher(
        &conn,
        CreateVoucherRequest {
            unit: VoucherUnit::Percent,
            amount: dec!(10),
            max_amount: None,
        },
    )
    .await?;
    let cart_id = seed_cart(&conn).await?;

    let result = order_service::checkout(&conn, cart_id, checkout_request(Some(voucher.id))).await?;

    assert_eq!(result.pricing.total_price, dec!(50000));
    assert_eq!(result.pricing.discount, dec!(5000));
    assert_eq!(result.pricing.final_price, dec!(45000));
    Ok(())
}

#[tokio::test]
async fn capped_voucher_clamps_the_discount() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let voucher = voucher_service::create_voucher(
        &conn,
        CreateVoucherRequest {
            unit: VoucherUnit::Percent,
            amount: dec!(10),
            max_amount: Some(dec!(3000)),
        },
    )
    .await?;
    let cart_id = seed_cart(&conn).await?;

    let result = order_service::checkout(&conn, cart_id, checkout_request(Some(voucher.id))).await?;

    assert_eq!(result.pricing.discount, dec!(3000));
    assert_eq!(result.pricing.final_price, dec!(47000));
    Ok(())
}

#[tokio::test]
async fn flat_voucher_can_push_the_final_price_negative() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let voucher = voucher_service::create_voucher(
        &conn,
        CreateVoucherRequest {
            unit: VoucherUnit::Rupiah,
            amount: dec!(60000),
            max_amount: None,
        },
    )
    .await?;
    let cart_id = seed_cart(&conn).await?;

    let result = order_service::checkout(&conn, cart_id, checkout_request(Some(voucher.id))).await?;

    // No floor at zero: the business rule is preserved as-is.
    assert_eq!(result.pricing.discount, dec!(60000));
    assert_eq!(result.pricing.final_price, dec!(-10000));
    Ok(())
}

#[tokio::test]
async fn dangling_voucher_reference_fails_fast() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let voucher = voucher_service::create_voucher(
        &conn,
        CreateVoucherRequest {
            unit: VoucherUnit::Rupiah,
            amount: dec!(1000),
            max_amount: None,
        },
    )
    .await?;
    let cart_id = seed_cart(&conn).await?;
    let result = order_service::checkout(&conn, cart_id, checkout_request(Some(voucher.id))).await?;

    // Pull the voucher out from under the order.
    Vouchers::delete_by_id(voucher.id).exec(&conn).await?;

    let err = order_service::price_order(&conn, result.order.id)
        .await
        .expect_err("pricing with a dangling voucher must fail");
    assert!(matches!(err, AppError::MissingAssociation("voucher")));
    Ok(())
}

#[tokio::test]
async fn checkout_with_an_empty_cart_fails() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let cart = cart_service::create_cart(&conn).await?;

    let err = order_service::checkout(&conn, cart.id, checkout_request(None))
        .await
        .expect_err("empty cart must not check out");
    assert!(matches!(err, AppError::BadRequest(_)));
    Ok(())
}

#[tokio::test]
async fn checkout_validates_customer_fields_before_writing() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let cart_id = seed_cart(&conn).await?;

    let mut request = checkout_request(None);
    request.name = "".into();
    request.email = "not-an-email".into();
    request.payment_type = "Barter".into();

    let err = order_service::checkout(&conn, cart_id, request)
        .await
        .expect_err("invalid customer fields must fail");
    match err {
        AppError::Validation(errors) => {
            assert_eq!(errors.messages_for("name"), vec!["can't be blank"]);
            assert_eq!(
                errors.messages_for("email"),
                vec!["must be a valid email address"]
            );
            assert_eq!(
                errors.messages_for("payment_type"),
                vec!["is not included in the list"]
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // Nothing was written: the cart still holds its items.
    let contents = cart_service::list_cart(&conn, cart_id).await?;
    assert_eq!(contents.items.len(), 2);
    assert_eq!(contents.total_price, dec!(50000));
    Ok(())
}

#[tokio::test]
async fn deleting_an_order_cascades_to_its_line_items() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let cart_id = seed_cart(&conn).await?;
    let result = order_service::checkout(&conn, cart_id, checkout_request(None)).await?;

    let before = LineItems::find().count(&conn).await?;
    order_service::delete_order(&conn, result.order.id).await?;
    let after = LineItems::find().count(&conn).await?;

    assert_eq!(before - after, 2);
    Ok(())
}

#[tokio::test]
async fn order_total_uses_the_same_formula_as_the_cart() -> anyhow::Result<()> {
    let conn = common::setup().await?;
    let cart_id = seed_cart(&conn).await?;
    let cart_total = cart_service::total_price(&conn, cart_id).await?;

    let result = order_service::checkout(&conn, cart_id, checkout_request(None)).await?;
    let order_total = order_service::total_price(&conn, result.order.id).await?;

    assert_eq!(cart_total, order_total);

    // Pricing results serialize cleanly for the presentation layer.
    let serialized = serde_json::to_value(&result.pricing)?;
    let total: rust_decimal::Decimal = serde_json::from_value(serialized["total_price"].clone())?;
    assert_eq!(total, dec!(50000));
    Ok(())
}
