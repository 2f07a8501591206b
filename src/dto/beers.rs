use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::beer::Beer;
use crate::domain::types::{BeerId, BeerStyle, CategoryId};

/// Wire shape of a beer.
///
/// `quantityOnHand` is always present and is `null` when inventory is hidden.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    pub id: BeerId,
    pub version: i32,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub quantity_on_hand: Option<i32>,
    pub price: Decimal,
    pub categories: Vec<CategoryId>,
    pub created_date: NaiveDateTime,
    pub update_date: NaiveDateTime,
}

impl From<Beer> for BeerDto {
    fn from(value: Beer) -> Self {
        Self {
            id: value.id,
            version: value.version.get(),
            beer_name: value.name.into_inner(),
            beer_style: value.style,
            upc: value.upc.into_inner(),
            quantity_on_hand: value.quantity_on_hand.map(|quantity| quantity.get()),
            price: value.price.get(),
            categories: value.categories.into_iter().collect(),
            created_date: value.created_at,
            update_date: value.updated_at,
        }
    }
}
