use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::domain::beer::{BeerPatch, NewBeer, UpdateBeer};
use crate::domain::types::{BeerName, BeerPrice, BeerStyle, QuantityOnHand, Upc};
use crate::forms::{FormError, non_blank, required};

/// Body of `POST /beer` and `PUT /beer/{beerId}`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeerForm {
    #[validate(
        required(message = "must not be null"),
        length(min = 1, max = 50, message = "size must be between 1 and 50")
    )]
    pub beer_name: Option<String>,
    #[validate(required(message = "must not be null"))]
    pub beer_style: Option<String>,
    #[validate(
        required(message = "must not be null"),
        length(min = 1, max = 10, message = "size must be between 1 and 10")
    )]
    pub upc: Option<String>,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub quantity_on_hand: Option<i32>,
    #[validate(required(message = "must not be null"))]
    pub price: Option<Decimal>,
}

/// Validated beer values, usable for both create and full update.
#[derive(Debug, Clone, PartialEq)]
pub struct BeerFormPayload {
    pub name: BeerName,
    pub style: BeerStyle,
    pub upc: Upc,
    pub quantity_on_hand: Option<QuantityOnHand>,
    pub price: BeerPrice,
}

impl BeerFormPayload {
    pub fn into_new_beer(self) -> NewBeer {
        NewBeer {
            name: self.name,
            style: self.style,
            upc: self.upc,
            quantity_on_hand: self.quantity_on_hand,
            price: self.price,
        }
    }

    pub fn into_update_beer(self) -> UpdateBeer {
        self.into_new_beer().into()
    }
}

impl TryFrom<BeerForm> for BeerFormPayload {
    type Error = FormError;

    fn try_from(value: BeerForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let name = required("beerName", value.beer_name)?;
        let style = required("beerStyle", value.beer_style)?;
        let upc = required("upc", value.upc)?;
        let price = required("price", value.price)?;

        Ok(Self {
            name: BeerName::new(name)?,
            style: style.parse()?,
            upc: Upc::new(upc)?,
            quantity_on_hand: value.quantity_on_hand.map(QuantityOnHand::new).transpose()?,
            price: BeerPrice::new(price)?,
        })
    }
}

/// Body of `PATCH /beer/{beerId}`. Absent, null or blank fields are left alone.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BeerPatchForm {
    #[validate(length(max = 50, message = "size must be between 1 and 50"))]
    pub beer_name: Option<String>,
    pub beer_style: Option<String>,
    #[validate(length(max = 10, message = "size must be between 1 and 10"))]
    pub upc: Option<String>,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub quantity_on_hand: Option<i32>,
    pub price: Option<Decimal>,
}

impl TryFrom<BeerPatchForm> for BeerPatch {
    type Error = FormError;

    fn try_from(value: BeerPatchForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: non_blank(value.beer_name).map(BeerName::new).transpose()?,
            style: non_blank(value.beer_style)
                .map(|style| style.parse::<BeerStyle>())
                .transpose()?,
            upc: non_blank(value.upc).map(Upc::new).transpose()?,
            quantity_on_hand: value.quantity_on_hand.map(QuantityOnHand::new).transpose()?,
            price: value.price.map(BeerPrice::new).transpose()?,
        })
    }
}
