//! Domain entities and value objects, free of persistence and HTTP concerns.

pub mod beer;
pub mod beer_order;
pub mod category;
pub mod customer;
pub mod types;
