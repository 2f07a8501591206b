use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::beer_order::BeerOrder;
use crate::domain::types::{BeerOrderId, CustomerId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerOrderDto {
    pub id: BeerOrderId,
    pub version: i32,
    pub customer_id: CustomerId,
    pub customer_ref: Option<String>,
    pub created_date: NaiveDateTime,
    pub last_modified_date: NaiveDateTime,
}

impl From<BeerOrder> for BeerOrderDto {
    fn from(value: BeerOrder) -> Self {
        Self {
            id: value.id,
            version: value.version.get(),
            customer_id: value.customer_id,
            customer_ref: value.customer_ref.map(|reference| reference.into_inner()),
            created_date: value.created_at,
            last_modified_date: value.updated_at,
        }
    }
}
