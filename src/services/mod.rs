pub use errors::{ServiceError, ServiceResult};

pub mod beers;
pub mod categories;
pub mod customers;
pub mod errors;
pub mod import_export;
pub mod orders;
