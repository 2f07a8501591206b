use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::types::{BeerId, CategoryId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: CategoryId,
    pub version: i32,
    pub description: String,
    pub beers: Vec<BeerId>,
    pub created_date: NaiveDateTime,
    pub last_modified_date: NaiveDateTime,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            version: value.version.get(),
            description: value.description.into_inner(),
            beers: value.beers.into_iter().collect(),
            created_date: value.created_at,
            last_modified_date: value.updated_at,
        }
    }
}
