use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::beer::Beer;
use crate::domain::types::{BeerId, CategoryDescription, CategoryId, RecordVersion};

/// Label that can be attached to many beers.
///
/// Two categories are equal when their descriptions match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub version: RecordVersion,
    pub description: CategoryDescription,
    /// Beers tagged with this category. Mirrors [`Beer::categories`].
    pub beers: BTreeSet<BeerId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description.hash(state);
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub description: CategoryDescription,
}

/// Tag `beer` with `category`, updating both sides.
///
/// Returns `false` when the link already existed.
pub fn link_category(beer: &mut Beer, category: &mut Category) -> bool {
    let added_to_beer = beer.categories.insert(category.id);
    let added_to_category = category.beers.insert(beer.id);
    added_to_beer || added_to_category
}

/// Remove the tag linking `beer` and `category`, updating both sides.
///
/// Returns `false` when there was nothing to remove.
pub fn unlink_category(beer: &mut Beer, category: &mut Category) -> bool {
    let removed_from_beer = beer.categories.remove(&category.id);
    let removed_from_category = category.beers.remove(&beer.id);
    removed_from_beer || removed_from_category
}
