pub mod cart;
pub mod catalog;
pub mod foods;
pub mod orders;
pub mod vouchers;
