//! Outbound JSON shapes, mapped from domain entities with `From`.

pub mod beers;
pub mod categories;
pub mod customers;
pub mod orders;
