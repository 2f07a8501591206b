use serde::Deserialize;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::domain::types::CategoryDescription;
use crate::forms::{FormError, required};

/// Body of `POST /category`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(
        required(message = "must not be null"),
        length(min = 1, max = 50, message = "size must be between 1 and 50")
    )]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub description: CategoryDescription,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            description: self.description,
        }
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let description = required("description", value.description)?;

        Ok(Self {
            description: CategoryDescription::new(description)?,
        })
    }
}
