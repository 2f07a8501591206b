use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerEmail, CustomerId, CustomerName, RecordVersion};

/// A customer able to place beer orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub version: RecordVersion,
    pub name: CustomerName,
    pub email: Option<CustomerEmail>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Customer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCustomer {
    pub name: CustomerName,
    pub email: Option<CustomerEmail>,
}

/// Replacement values for every mutable field of a [`Customer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateCustomer {
    pub name: CustomerName,
    pub email: Option<CustomerEmail>,
}

/// Sparse set of changes for a [`Customer`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPatch {
    pub name: Option<CustomerName>,
    pub email: Option<CustomerEmail>,
}

impl Customer {
    /// Merge a patch over the stored values producing a full update.
    pub fn apply_patch(&self, patch: CustomerPatch) -> UpdateCustomer {
        UpdateCustomer {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            email: patch.email.or_else(|| self.email.clone()),
        }
    }
}

impl From<NewCustomer> for UpdateCustomer {
    fn from(customer: NewCustomer) -> Self {
        Self {
            name: customer.name,
            email: customer.email,
        }
    }
}
