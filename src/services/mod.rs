pub mod cart_service;
pub mod catalog_service;
pub mod food_service;
pub mod order_service;
pub mod voucher_service;
