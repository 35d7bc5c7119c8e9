use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::{
    dto::vouchers::CreateVoucherRequest,
    entity::{
        vouchers::{ActiveModel as VoucherActive, Model as VoucherModel},
        Vouchers,
    },
    error::{AppError, AppResult},
    models::Voucher,
    validation,
};

pub async fn create_voucher(
    conn: &DatabaseConnection,
    payload: CreateVoucherRequest,
) -> AppResult<Voucher> {
    validation::validate_voucher(&payload).map_err(AppError::Validation)?;

    let voucher = VoucherActive {
        id: Set(Uuid::new_v4()),
        unit: Set(payload.unit),
        amount: Set(payload.amount),
        max_amount: Set(payload.max_amount),
        created_at: Set(Utc::now().into()),
    }
    .insert(conn)
    .await?;

    Ok(voucher_from_entity(voucher))
}

pub async fn get_voucher(conn: &DatabaseConnection, id: Uuid) -> AppResult<Voucher> {
    let voucher = Vouchers::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(voucher_from_entity(voucher))
}

fn voucher_from_entity(model: VoucherModel) -> Voucher {
    Voucher {
        id: model.id,
        unit: model.unit,
        amount: model.amount,
        max_amount: model.max_amount,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
