//! Data and business-rule layer of a food-ordering application: catalog
//! entities, carts, orders, and voucher pricing over a SeaORM persistence
//! collaborator. HTTP, views, and authentication live elsewhere; this crate
//! exposes async service functions returning plain serializable results.

pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod models;
pub mod services;
pub mod validation;
