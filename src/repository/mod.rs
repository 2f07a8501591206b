use crate::db::{DbConnection, DbPool};
use crate::domain::beer::{Beer, NewBeer, UpdateBeer};
use crate::domain::beer_order::{BeerOrder, NewBeerOrder};
use crate::domain::category::{Category, NewCategory};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::{BeerId, BeerStyle, CategoryId, CustomerId};
use crate::pagination::Pagination;

pub mod beer;
pub mod beer_order;
pub mod category;
pub mod customer;
pub mod errors;
pub mod memory;

pub use errors::{RepositoryError, RepositoryResult};
pub use memory::MemoryRepository;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// `OFFSET` and `LIMIT` for a page. SQLite reads a negative offset as zero,
/// so offsets beyond `i64::MAX` are clamped instead of wrapped.
fn sql_window(pagination: &Pagination) -> (i64, i64) {
    let offset = i64::try_from(pagination.offset()).unwrap_or(i64::MAX);
    let limit = i64::try_from(pagination.limit()).unwrap_or(i64::MAX);
    (offset, limit)
}

/// Query parameters used when listing beers.
///
/// Absent criteria match everything; present criteria are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct BeerListQuery {
    /// Case-insensitive substring of the beer name.
    pub name: Option<String>,
    /// Exact beer style.
    pub style: Option<BeerStyle>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl BeerListQuery {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn style(mut self, style: BeerStyle) -> Self {
        self.style = Some(style);
        self
    }
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Query parameters used when listing customers.
#[derive(Debug, Clone, Default)]
pub struct CustomerListQuery {
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Read-only operations for beer entities.
pub trait BeerReader {
    /// List beers matching the query, returning the unpaginated total alongside the page.
    fn list_beers(&self, query: BeerListQuery) -> RepositoryResult<(usize, Vec<Beer>)>;
    /// Retrieve a beer by its identifier.
    fn get_beer_by_id(&self, id: BeerId) -> RepositoryResult<Option<Beer>>;
    /// Number of stored beers.
    fn count_beers(&self) -> RepositoryResult<usize>;
}

/// Write operations for beer entities.
pub trait BeerWriter {
    /// Persist a new beer, returning it with identifier, version and timestamps assigned.
    fn create_beer(&self, beer: &NewBeer) -> RepositoryResult<Beer>;
    /// Persist several beers at once.
    fn create_beers(&self, beers: &[NewBeer]) -> RepositoryResult<usize>;
    /// Overwrite the mutable fields of a beer. `None` if the id is unknown.
    fn update_beer(&self, id: BeerId, beer: &UpdateBeer) -> RepositoryResult<Option<Beer>>;
    /// Delete a beer and its category links.
    fn delete_beer(&self, id: BeerId) -> RepositoryResult<usize>;
}

/// Read-only operations for customer entities.
pub trait CustomerReader {
    /// List customers, returning the unpaginated total alongside the page.
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
    /// Retrieve a customer by its identifier.
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    /// Number of stored customers.
    fn count_customers(&self) -> RepositoryResult<usize>;
}

/// Write operations for customer entities.
pub trait CustomerWriter {
    /// Persist a new customer.
    fn create_customer(&self, customer: &NewCustomer) -> RepositoryResult<Customer>;
    /// Overwrite the mutable fields of a customer. `None` if the id is unknown.
    fn update_customer(
        &self,
        id: CustomerId,
        customer: &UpdateCustomer,
    ) -> RepositoryResult<Option<Customer>>;
    /// Delete a customer together with its orders.
    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by description.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for categories and their beer links.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Link a beer and a category. Returns the number of links created (0 or 1).
    fn add_beer_category(&self, beer_id: BeerId, category_id: CategoryId)
    -> RepositoryResult<usize>;
    /// Unlink a beer and a category. Returns the number of links removed (0 or 1).
    fn remove_beer_category(
        &self,
        beer_id: BeerId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for beer orders.
pub trait BeerOrderReader {
    /// Orders placed by a customer, oldest first.
    fn list_orders_for_customer(&self, customer_id: CustomerId)
    -> RepositoryResult<Vec<BeerOrder>>;
}

/// Write operations for beer orders.
pub trait BeerOrderWriter {
    /// Persist a new order.
    fn create_beer_order(&self, order: &NewBeerOrder) -> RepositoryResult<BeerOrder>;
}

/// Every reader and writer the HTTP layer needs, for any backing store.
pub trait InventoryRepository:
    BeerReader
    + BeerWriter
    + CustomerReader
    + CustomerWriter
    + CategoryReader
    + CategoryWriter
    + BeerOrderReader
    + BeerOrderWriter
    + Send
    + Sync
    + 'static
{
}

impl<T> InventoryRepository for T where
    T: BeerReader
        + BeerWriter
        + CustomerReader
        + CustomerWriter
        + CategoryReader
        + CategoryWriter
        + BeerOrderReader
        + BeerOrderWriter
        + Send
        + Sync
        + 'static
{
}
