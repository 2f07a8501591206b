use serde::Deserialize;
use validator::Validate;

use crate::domain::beer_order::NewBeerOrder;
use crate::domain::types::{CustomerId, CustomerRef};
use crate::forms::{FormError, non_blank};

/// Body of `POST /customer/{customerId}/orders`. May be empty.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeerOrderForm {
    #[validate(length(max = 255, message = "size must be between 0 and 255"))]
    pub customer_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeerOrderFormPayload {
    pub customer_ref: Option<CustomerRef>,
}

impl BeerOrderFormPayload {
    pub fn into_new_order(self, customer_id: CustomerId) -> NewBeerOrder {
        NewBeerOrder {
            customer_id,
            customer_ref: self.customer_ref,
        }
    }
}

impl TryFrom<BeerOrderForm> for BeerOrderFormPayload {
    type Error = FormError;

    fn try_from(value: BeerOrderForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            customer_ref: non_blank(value.customer_ref)
                .map(CustomerRef::new)
                .transpose()?,
        })
    }
}
