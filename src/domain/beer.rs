use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BeerId, BeerName, BeerPrice, BeerStyle, CategoryId, QuantityOnHand, RecordVersion, Upc,
};

/// A beer kept in inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Beer {
    pub id: BeerId,
    pub version: RecordVersion,
    pub name: BeerName,
    pub style: BeerStyle,
    pub upc: Upc,
    pub quantity_on_hand: Option<QuantityOnHand>,
    pub price: BeerPrice,
    /// Categories this beer is tagged with. Mirrors [`Category::beers`](super::category::Category).
    pub categories: BTreeSet<CategoryId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Beer`].
///
/// Identifier, version and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBeer {
    pub name: BeerName,
    pub style: BeerStyle,
    pub upc: Upc,
    pub quantity_on_hand: Option<QuantityOnHand>,
    pub price: BeerPrice,
}

/// Replacement values for every mutable field of a [`Beer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateBeer {
    pub name: BeerName,
    pub style: BeerStyle,
    pub upc: Upc,
    pub quantity_on_hand: Option<QuantityOnHand>,
    pub price: BeerPrice,
}

/// Sparse set of changes. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeerPatch {
    pub name: Option<BeerName>,
    pub style: Option<BeerStyle>,
    pub upc: Option<Upc>,
    pub quantity_on_hand: Option<QuantityOnHand>,
    pub price: Option<BeerPrice>,
}

impl BeerPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Beer {
    /// Merge a patch over the stored values producing a full update.
    pub fn apply_patch(&self, patch: BeerPatch) -> UpdateBeer {
        UpdateBeer {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            style: patch.style.unwrap_or(self.style),
            upc: patch.upc.unwrap_or_else(|| self.upc.clone()),
            quantity_on_hand: patch.quantity_on_hand.or(self.quantity_on_hand),
            price: patch.price.unwrap_or(self.price),
        }
    }

    /// Hide stock levels from the outside world.
    pub fn without_inventory(mut self) -> Self {
        self.quantity_on_hand = None;
        self
    }
}

impl From<NewBeer> for UpdateBeer {
    fn from(beer: NewBeer) -> Self {
        Self {
            name: beer.name,
            style: beer.style,
            upc: beer.upc,
            quantity_on_hand: beer.quantity_on_hand,
            price: beer.price,
        }
    }
}
