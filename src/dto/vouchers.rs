use rust_decimal::Decimal;
use serde::Deserialize;

use crate::entity::vouchers::VoucherUnit;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVoucherRequest {
    pub unit: VoucherUnit,
    pub amount: Decimal,
    pub max_amount: Option<Decimal>,
}
