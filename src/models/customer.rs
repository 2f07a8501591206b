use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::Customer as DomainCustomer;
use crate::domain::types::{
    CustomerEmail, CustomerId, CustomerName, RecordVersion, TypeConstraintError,
};

/// Diesel model representing the `customers` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Customer {
    pub id: String,
    pub version: i32,
    pub name: String,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Customer`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub id: String,
    pub version: i32,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::parse(&customer.id)?,
            version: RecordVersion::new(customer.version)?,
            name: CustomerName::new(customer.name)?,
            email: customer.email.map(CustomerEmail::new).transpose()?,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}
