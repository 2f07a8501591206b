use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDateTime, Utc};

use crate::domain::beer::{Beer, NewBeer, UpdateBeer};
use crate::domain::beer_order::{BeerOrder, NewBeerOrder};
use crate::domain::category::{Category, NewCategory, link_category, unlink_category};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::{
    BeerId, BeerOrderId, CategoryId, CustomerId, RecordVersion, fold_case,
};
use crate::pagination::Pagination;
use crate::repository::{
    BeerListQuery, BeerOrderReader, BeerOrderWriter, BeerReader, BeerWriter, CategoryReader,
    CategoryWriter, CustomerListQuery, CustomerReader, CustomerWriter, RepositoryError,
    RepositoryResult,
};

#[derive(Debug, Default)]
struct MemoryState {
    beers: HashMap<BeerId, Beer>,
    customers: HashMap<CustomerId, Customer>,
    categories: HashMap<CategoryId, Category>,
    orders: Vec<BeerOrder>,
}

/// Process-local repository keeping every entity in hash maps.
///
/// Behaves like [`DieselRepository`](super::DieselRepository) for every
/// reader and writer trait; contents vanish when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, MemoryState>> {
        self.state.read().map_err(|_| RepositoryError::LockPoisoned)
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state.write().map_err(|_| RepositoryError::LockPoisoned)
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn paginate<T>(items: Vec<T>, pagination: Option<&Pagination>) -> Vec<T> {
    match pagination {
        Some(pagination) => items
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.limit())
            .collect(),
        None => items,
    }
}

fn beer_from_new(beer: &NewBeer) -> Beer {
    let now = now();
    Beer {
        id: BeerId::generate(),
        version: RecordVersion::INITIAL,
        name: beer.name.clone(),
        style: beer.style,
        upc: beer.upc.clone(),
        quantity_on_hand: beer.quantity_on_hand,
        price: beer.price,
        categories: Default::default(),
        created_at: now,
        updated_at: now,
    }
}

impl BeerReader for MemoryRepository {
    fn list_beers(&self, query: BeerListQuery) -> RepositoryResult<(usize, Vec<Beer>)> {
        let state = self.read()?;

        let mut items: Vec<Beer> = state.beers.values().cloned().collect();
        if let Some(name) = &query.name {
            let name = fold_case(name);
            items.retain(|beer| beer.name.search_key().contains(&name));
        }
        if let Some(style) = query.style {
            items.retain(|beer| beer.style == style);
        }
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let total = items.len();
        Ok((total, paginate(items, query.pagination.as_ref())))
    }

    fn get_beer_by_id(&self, id: BeerId) -> RepositoryResult<Option<Beer>> {
        Ok(self.read()?.beers.get(&id).cloned())
    }

    fn count_beers(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.beers.len())
    }
}

impl BeerWriter for MemoryRepository {
    fn create_beer(&self, beer: &NewBeer) -> RepositoryResult<Beer> {
        let beer = beer_from_new(beer);
        self.write()?.beers.insert(beer.id, beer.clone());
        Ok(beer)
    }

    fn create_beers(&self, beers: &[NewBeer]) -> RepositoryResult<usize> {
        let mut state = self.write()?;
        for beer in beers.iter().map(beer_from_new) {
            state.beers.insert(beer.id, beer);
        }
        Ok(beers.len())
    }

    fn update_beer(&self, id: BeerId, beer: &UpdateBeer) -> RepositoryResult<Option<Beer>> {
        let mut state = self.write()?;
        let Some(stored) = state.beers.get_mut(&id) else {
            return Ok(None);
        };

        stored.name = beer.name.clone();
        stored.style = beer.style;
        stored.upc = beer.upc.clone();
        stored.quantity_on_hand = beer.quantity_on_hand;
        stored.price = beer.price;
        stored.version = stored.version.next();
        stored.updated_at = now();

        Ok(Some(stored.clone()))
    }

    fn delete_beer(&self, id: BeerId) -> RepositoryResult<usize> {
        let mut state = self.write()?;
        let Some(mut beer) = state.beers.remove(&id) else {
            return Ok(0);
        };

        for category_id in std::mem::take(&mut beer.categories) {
            if let Some(category) = state.categories.get_mut(&category_id) {
                category.beers.remove(&id);
            }
        }
        Ok(1)
    }
}

impl CustomerReader for MemoryRepository {
    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        let state = self.read()?;

        let mut items: Vec<Customer> = state.customers.values().cloned().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let total = items.len();
        Ok((total, paginate(items, query.pagination.as_ref())))
    }

    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        Ok(self.read()?.customers.get(&id).cloned())
    }

    fn count_customers(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.customers.len())
    }
}

impl CustomerWriter for MemoryRepository {
    fn create_customer(&self, customer: &NewCustomer) -> RepositoryResult<Customer> {
        let now = now();
        let customer = Customer {
            id: CustomerId::generate(),
            version: RecordVersion::INITIAL,
            name: customer.name.clone(),
            email: customer.email.clone(),
            created_at: now,
            updated_at: now,
        };
        self.write()?
            .customers
            .insert(customer.id, customer.clone());
        Ok(customer)
    }

    fn update_customer(
        &self,
        id: CustomerId,
        customer: &UpdateCustomer,
    ) -> RepositoryResult<Option<Customer>> {
        let mut state = self.write()?;
        let Some(stored) = state.customers.get_mut(&id) else {
            return Ok(None);
        };

        stored.name = customer.name.clone();
        stored.email = customer.email.clone();
        stored.version = stored.version.next();
        stored.updated_at = now();

        Ok(Some(stored.clone()))
    }

    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<usize> {
        let mut state = self.write()?;
        if state.customers.remove(&id).is_none() {
            return Ok(0);
        }
        state.orders.retain(|order| order.customer_id != id);
        Ok(1)
    }
}

impl CategoryReader for MemoryRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let state = self.read()?;

        let mut items: Vec<Category> = state.categories.values().cloned().collect();
        items.sort_by(|a, b| a.description.cmp(&b.description).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }
}

impl CategoryWriter for MemoryRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let now = now();
        let category = Category {
            id: CategoryId::generate(),
            version: RecordVersion::INITIAL,
            description: category.description.clone(),
            beers: Default::default(),
            created_at: now,
            updated_at: now,
        };
        self.write()?
            .categories
            .insert(category.id, category.clone());
        Ok(category)
    }

    fn add_beer_category(
        &self,
        beer_id: BeerId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize> {
        let mut guard = self.write()?;
        let state = &mut *guard;
        let (Some(beer), Some(category)) = (
            state.beers.get_mut(&beer_id),
            state.categories.get_mut(&category_id),
        ) else {
            return Err(RepositoryError::NotFound);
        };

        if !link_category(beer, category) {
            return Ok(0);
        }

        let now = now();
        beer.version = beer.version.next();
        beer.updated_at = now;
        category.version = category.version.next();
        category.updated_at = now;
        Ok(1)
    }

    fn remove_beer_category(
        &self,
        beer_id: BeerId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize> {
        let mut guard = self.write()?;
        let state = &mut *guard;
        let (Some(beer), Some(category)) = (
            state.beers.get_mut(&beer_id),
            state.categories.get_mut(&category_id),
        ) else {
            return Err(RepositoryError::NotFound);
        };

        if !unlink_category(beer, category) {
            return Ok(0);
        }

        let now = now();
        beer.version = beer.version.next();
        beer.updated_at = now;
        category.version = category.version.next();
        category.updated_at = now;
        Ok(1)
    }
}

impl BeerOrderReader for MemoryRepository {
    fn list_orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> RepositoryResult<Vec<BeerOrder>> {
        Ok(self
            .read()?
            .orders
            .iter()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

impl BeerOrderWriter for MemoryRepository {
    fn create_beer_order(&self, order: &NewBeerOrder) -> RepositoryResult<BeerOrder> {
        let mut state = self.write()?;
        if !state.customers.contains_key(&order.customer_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "unknown customer {}",
                order.customer_id
            )));
        }

        let now = now();
        let order = BeerOrder {
            id: BeerOrderId::generate(),
            version: RecordVersion::INITIAL,
            customer_id: order.customer_id,
            customer_ref: order.customer_ref.clone(),
            created_at: now,
            updated_at: now,
        };
        state.orders.push(order.clone());
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{
        BeerName, BeerPrice, BeerStyle, CategoryDescription, CustomerName, QuantityOnHand, Upc,
    };
    use crate::pagination::build_page_request;

    fn new_beer(name: &str, style: BeerStyle) -> NewBeer {
        NewBeer {
            name: BeerName::new(name).unwrap(),
            style,
            upc: Upc::new("123456").unwrap(),
            quantity_on_hand: Some(QuantityOnHand::new(10).unwrap()),
            price: BeerPrice::parse("12.99").unwrap(),
        }
    }

    #[test]
    fn create_assigns_identity_and_version() {
        let repo = MemoryRepository::new();
        let beer = repo.create_beer(&new_beer("Galaxy Cat", BeerStyle::PaleAle)).unwrap();

        assert_eq!(beer.version, RecordVersion::INITIAL);
        assert_eq!(beer.created_at, beer.updated_at);
        assert_eq!(repo.get_beer_by_id(beer.id).unwrap(), Some(beer));
    }

    #[test]
    fn filters_by_name_and_style() {
        let repo = MemoryRepository::new();
        repo.create_beers(&[
            new_beer("Galaxy Cat", BeerStyle::PaleAle),
            new_beer("Crank", BeerStyle::PaleAle),
            new_beer("Sunshine City", BeerStyle::Ipa),
        ])
        .unwrap();

        let (total, items) = repo
            .list_beers(BeerListQuery::default().name("CAT"))
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].name.as_str(), "Galaxy Cat");

        let (total, _) = repo
            .list_beers(BeerListQuery::default().style(BeerStyle::PaleAle))
            .unwrap();
        assert_eq!(total, 2);

        let (total, items) = repo
            .list_beers(BeerListQuery::default().name("c").style(BeerStyle::Ipa))
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].name.as_str(), "Sunshine City");
    }

    #[test]
    fn paginates_sorted_results() {
        let repo = MemoryRepository::new();
        let beers: Vec<NewBeer> = (0..30)
            .map(|i| new_beer(&format!("Beer {i:02}"), BeerStyle::Lager))
            .collect();
        repo.create_beers(&beers).unwrap();

        let query = BeerListQuery::default().paginate(build_page_request(Some(2), Some(25)));
        let (total, items) = repo.list_beers(query).unwrap();
        assert_eq!(total, 30);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].name.as_str(), "Beer 25");
    }

    #[test]
    fn update_bumps_version_once() {
        let repo = MemoryRepository::new();
        let beer = repo.create_beer(&new_beer("Crank", BeerStyle::PaleAle)).unwrap();

        let mut update: UpdateBeer = new_beer("Crank", BeerStyle::PaleAle).into();
        update.name = BeerName::new("Crankier").unwrap();
        let updated = repo.update_beer(beer.id, &update).unwrap().unwrap();

        assert_eq!(updated.version, beer.version.next());
        assert_eq!(updated.name.as_str(), "Crankier");
        assert_eq!(updated.created_at, beer.created_at);
        assert!(repo.update_beer(BeerId::generate(), &update).unwrap().is_none());
    }

    #[test]
    fn link_and_delete_keep_both_sides_consistent() {
        let repo = MemoryRepository::new();
        let beer = repo.create_beer(&new_beer("Crank", BeerStyle::PaleAle)).unwrap();
        let category = repo
            .create_category(&NewCategory {
                description: CategoryDescription::new("Ales").unwrap(),
            })
            .unwrap();

        assert_eq!(repo.add_beer_category(beer.id, category.id).unwrap(), 1);
        assert_eq!(repo.add_beer_category(beer.id, category.id).unwrap(), 0);

        let stored_beer = repo.get_beer_by_id(beer.id).unwrap().unwrap();
        let stored_category = repo.get_category_by_id(category.id).unwrap().unwrap();
        assert!(stored_beer.categories.contains(&category.id));
        assert!(stored_category.beers.contains(&beer.id));
        assert_eq!(stored_beer.version, beer.version.next());

        assert_eq!(repo.delete_beer(beer.id).unwrap(), 1);
        let stored_category = repo.get_category_by_id(category.id).unwrap().unwrap();
        assert!(stored_category.beers.is_empty());
    }

    #[test]
    fn linking_unknown_entities_is_not_found() {
        let repo = MemoryRepository::new();
        assert!(matches!(
            repo.add_beer_category(BeerId::generate(), CategoryId::generate()),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn deleting_customer_drops_orders() {
        let repo = MemoryRepository::new();
        let customer = repo
            .create_customer(&NewCustomer {
                name: CustomerName::new("Eva Blue").unwrap(),
                email: None,
            })
            .unwrap();
        repo.create_beer_order(&NewBeerOrder {
            customer_id: customer.id,
            customer_ref: None,
        })
        .unwrap();
        assert_eq!(repo.list_orders_for_customer(customer.id).unwrap().len(), 1);

        assert_eq!(repo.delete_customer(customer.id).unwrap(), 1);
        assert!(repo.list_orders_for_customer(customer.id).unwrap().is_empty());
        assert_eq!(repo.delete_customer(customer.id).unwrap(), 0);
    }
}
