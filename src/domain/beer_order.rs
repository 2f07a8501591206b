use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BeerOrderId, CustomerId, CustomerRef, RecordVersion};

/// An order placed by a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeerOrder {
    pub id: BeerOrderId,
    pub version: RecordVersion,
    pub customer_id: CustomerId,
    pub customer_ref: Option<CustomerRef>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`BeerOrder`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBeerOrder {
    pub customer_id: CustomerId,
    pub customer_ref: Option<CustomerRef>,
}
