//! Diesel row structs and their conversions into domain entities.

pub mod beer;
pub mod beer_order;
pub mod category;
pub mod customer;
#[cfg(feature = "server")]
pub mod config;
