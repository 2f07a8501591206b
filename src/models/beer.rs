use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::beer::Beer as DomainBeer;
use crate::domain::types::{
    BeerId, BeerName, BeerPrice, BeerStyle, QuantityOnHand, RecordVersion, TypeConstraintError,
    Upc,
};

/// Diesel model representing a row in the `beers` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::beers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Beer {
    pub id: String,
    pub version: i32,
    pub name: String,
    pub style: String,
    pub upc: String,
    pub quantity_on_hand: Option<i32>,
    pub price: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub search_name: String,
}

/// Insertable form of [`Beer`] used for creating new rows.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::beers)]
pub struct NewBeer<'a> {
    pub id: String,
    pub version: i32,
    pub name: &'a str,
    pub style: &'a str,
    pub upc: &'a str,
    pub quantity_on_hand: Option<i32>,
    pub price: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub search_name: String,
}

/// Row of the `beer_categories` join table.
#[derive(Debug, Clone, Insertable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::beer_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BeerCategory {
    pub beer_id: String,
    pub category_id: String,
}

impl TryFrom<Beer> for DomainBeer {
    type Error = TypeConstraintError;

    fn try_from(beer: Beer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BeerId::parse(&beer.id)?,
            version: RecordVersion::new(beer.version)?,
            name: BeerName::new(beer.name)?,
            style: beer.style.parse::<BeerStyle>()?,
            upc: Upc::new(beer.upc)?,
            quantity_on_hand: beer.quantity_on_hand.map(QuantityOnHand::new).transpose()?,
            price: BeerPrice::parse(&beer.price)?,
            categories: BTreeSet::new(),
            created_at: beer.created_at,
            updated_at: beer.updated_at,
        })
    }
}
