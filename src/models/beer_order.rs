use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::beer_order::BeerOrder as DomainBeerOrder;
use crate::domain::types::{
    BeerOrderId, CustomerId, CustomerRef, RecordVersion, TypeConstraintError,
};

/// Diesel model representing the `beer_orders` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::beer_orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BeerOrder {
    pub id: String,
    pub version: i32,
    pub customer_id: String,
    pub customer_ref: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`BeerOrder`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::beer_orders)]
pub struct NewBeerOrder<'a> {
    pub id: String,
    pub version: i32,
    pub customer_id: String,
    pub customer_ref: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BeerOrder> for DomainBeerOrder {
    type Error = TypeConstraintError;

    fn try_from(order: BeerOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BeerOrderId::parse(&order.id)?,
            version: RecordVersion::new(order.version)?,
            customer_id: CustomerId::parse(&order.customer_id)?,
            customer_ref: order.customer_ref.map(CustomerRef::new).transpose()?,
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}
