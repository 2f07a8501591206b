use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::{CustomerPatch, NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerEmail, CustomerName};
use crate::forms::{FormError, non_blank, required};

/// Body of `POST /customer` and `PUT /customer/{customerId}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CustomerForm {
    #[validate(
        required(message = "must not be null"),
        length(min = 1, max = 255, message = "size must be between 1 and 255")
    )]
    pub name: Option<String>,
    #[validate(
        email(message = "must be a well-formed email address"),
        length(max = 255, message = "size must be between 0 and 255")
    )]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFormPayload {
    pub name: CustomerName,
    pub email: Option<CustomerEmail>,
}

impl CustomerFormPayload {
    pub fn into_new_customer(self) -> NewCustomer {
        NewCustomer {
            name: self.name,
            email: self.email,
        }
    }

    pub fn into_update_customer(self) -> UpdateCustomer {
        self.into_new_customer().into()
    }
}

impl TryFrom<CustomerForm> for CustomerFormPayload {
    type Error = FormError;

    fn try_from(value: CustomerForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = required("name", value.name)?;

        Ok(Self {
            name: CustomerName::new(name)?,
            email: non_blank(value.email).map(CustomerEmail::new).transpose()?,
        })
    }
}

/// Body of `PATCH /customer/{customerId}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CustomerPatchForm {
    #[validate(length(max = 255, message = "size must be between 1 and 255"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a well-formed email address"))]
    pub email: Option<String>,
}

impl TryFrom<CustomerPatchForm> for CustomerPatch {
    type Error = FormError;

    fn try_from(value: CustomerPatchForm) -> Result<Self, Self::Error> {
        let value = CustomerPatchForm {
            name: non_blank(value.name),
            email: non_blank(value.email),
        };
        value.validate()?;

        Ok(Self {
            name: value.name.map(CustomerName::new).transpose()?,
            email: value.email.map(CustomerEmail::new).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_name() {
        let result: Result<CustomerFormPayload, _> = CustomerForm::default().try_into();
        let errors = result.unwrap_err().into_field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn rejects_malformed_email() {
        let form = CustomerForm {
            name: Some("Eva Blue".to_string()),
            email: Some("not-an-email".to_string()),
        };
        let result: Result<CustomerFormPayload, _> = form.try_into();
        assert_eq!(result.unwrap_err().into_field_errors()[0].field, "email");
    }

    #[test]
    fn patch_skips_blank_email() {
        let form = CustomerPatchForm {
            name: None,
            email: Some(String::new()),
        };
        let patch: CustomerPatch = form.try_into().unwrap();
        assert_eq!(patch, CustomerPatch::default());
    }
}
