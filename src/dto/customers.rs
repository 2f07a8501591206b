use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::types::CustomerId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: CustomerId,
    pub version: i32,
    pub name: String,
    pub email: Option<String>,
    pub created_date: NaiveDateTime,
    pub last_modified_date: NaiveDateTime,
}

impl From<Customer> for CustomerDto {
    fn from(value: Customer) -> Self {
        Self {
            id: value.id,
            version: value.version.get(),
            name: value.name.into_inner(),
            email: value.email.map(|email| email.into_inner()),
            created_date: value.created_at,
            last_modified_date: value.updated_at,
        }
    }
}
