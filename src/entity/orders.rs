use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub email: String,
    pub payment_type: PaymentType,
    pub voucher_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

/// Closed set of accepted payment methods, stored as an integer:
/// Cash=0, GoPay=1, CreditCard=2.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PaymentType {
    #[sea_orm(num_value = 0)]
    Cash,
    #[sea_orm(num_value = 1)]
    GoPay,
    #[sea_orm(num_value = 2)]
    CreditCard,
}

impl PaymentType {
    /// Parses the human-facing name submitted by the presentation layer.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Cash" => Some(Self::Cash),
            "Go Pay" => Some(Self::GoPay),
            "Credit Card" => Some(Self::CreditCard),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::GoPay => "Go Pay",
            Self::CreditCard => "Credit Card",
        }
    }
}

// The voucher link is a plain id the services resolve themselves. A
// dangling reference must stay representable so pricing can fail fast
// on it instead of the database rejecting the state outright.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::line_items::Entity")]
    LineItems,
}

impl Related<super::line_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
