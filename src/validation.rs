//! Per-entity field validation, run before every insert or update.
//!
//! Each `validate_*` function collects every failed constraint into a
//! [`ValidationErrors`] list instead of stopping at the first one, so the
//! presentation layer can surface all problems at once. Uniqueness checks
//! need the store and therefore live in the services, which append to the
//! same error list before persisting.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::dto::foods::{CreateFoodRequest, UpdateFoodRequest};
use crate::dto::orders::CheckoutRequest;
use crate::dto::vouchers::CreateVoucherRequest;
use crate::entity::orders::PaymentType;
use crate::error::ValidationErrors;

pub const BLANK: &str = "can't be blank";
pub const TAKEN: &str = "has already been taken";
pub const NOT_A_NUMBER: &str = "is not a number";
pub const PRICE_TOO_LOW: &str = "must be greater than or equal to 0.01";
pub const BAD_IMAGE_URL: &str = "must be an URL for GIF, JPG, or PNG image";
pub const BAD_EMAIL: &str = "must be a valid email address";
pub const NOT_IN_LIST: &str = "is not included in the list";

const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[^@\s]+@(?:[-a-z0-9]+\.)+[a-z]{2,}$")
            .unwrap_or_else(|e| panic!("email pattern is invalid: {e}"))
    })
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Prices arrive from the presentation layer as the raw form value, so a
/// non-numeric submission is a field error, not a deserialization failure.
fn check_price(errors: &mut ValidationErrors, raw: &str) -> Option<Decimal> {
    match Decimal::from_str(raw.trim()) {
        Ok(price) if price >= MIN_PRICE => Some(price),
        Ok(_) => {
            errors.add("price", PRICE_TOO_LOW);
            None
        }
        Err(_) => {
            errors.add("price", NOT_A_NUMBER);
            None
        }
    }
}

fn check_image_url(errors: &mut ValidationErrors, url: &str) {
    if is_blank(url) {
        return;
    }
    let lowered = url.to_ascii_lowercase();
    let ok = [".gif", ".jpg", ".png"]
        .iter()
        .any(|ext| lowered.ends_with(ext));
    if !ok {
        errors.add("image_url", BAD_IMAGE_URL);
    }
}

/// Field-level checks for a new food. Returns the parsed price on success;
/// the name-uniqueness check happens in the food service against the store.
pub fn validate_food(req: &CreateFoodRequest) -> Result<Decimal, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if is_blank(&req.name) {
        errors.add("name", BLANK);
    }
    if is_blank(&req.description) {
        errors.add("description", BLANK);
    }
    let price = check_price(&mut errors, &req.price);
    if let Some(url) = req.image_url.as_deref() {
        check_image_url(&mut errors, url);
    }
    match price {
        Some(price) if errors.is_empty() => Ok(price),
        _ => Err(errors),
    }
}

/// Same checks as [`validate_food`], applied only to the fields an update
/// actually touches. Untouched fields keep their stored values.
pub fn validate_food_update(req: &UpdateFoodRequest) -> Result<Option<Decimal>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(name) = req.name.as_deref() {
        if is_blank(name) {
            errors.add("name", BLANK);
        }
    }
    if let Some(description) = req.description.as_deref() {
        if is_blank(description) {
            errors.add("description", BLANK);
        }
    }
    let price = match req.price.as_deref() {
        Some(raw) => check_price(&mut errors, raw),
        None => None,
    };
    if let Some(url) = req.image_url.as_deref() {
        check_image_url(&mut errors, url);
    }
    if errors.is_empty() {
        Ok(price)
    } else {
        Err(errors)
    }
}

/// Checkout field checks. Returns the parsed payment type; any name outside
/// the closed set is rejected as "not included in the list".
pub fn validate_order(req: &CheckoutRequest) -> Result<PaymentType, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if is_blank(&req.name) {
        errors.add("name", BLANK);
    }
    if is_blank(&req.address) {
        errors.add("address", BLANK);
    }
    if is_blank(&req.email) {
        errors.add("email", BLANK);
    } else if !email_pattern().is_match(req.email.trim()) {
        errors.add("email", BAD_EMAIL);
    }
    let payment_type = if is_blank(&req.payment_type) {
        errors.add("payment_type", BLANK);
        None
    } else {
        let parsed = PaymentType::from_name(req.payment_type.trim());
        if parsed.is_none() {
            errors.add("payment_type", NOT_IN_LIST);
        }
        parsed
    };
    match payment_type {
        Some(payment_type) if errors.is_empty() => Ok(payment_type),
        _ => Err(errors),
    }
}

pub fn validate_tag(name: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if is_blank(name) {
        errors.add("name", BLANK);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn validate_voucher(req: &CreateVoucherRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if req.amount < MIN_PRICE {
        errors.add("amount", PRICE_TOO_LOW);
    }
    if let Some(max) = req.max_amount {
        if max < MIN_PRICE {
            errors.add("max_amount", PRICE_TOO_LOW);
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
