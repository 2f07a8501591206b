use chrono::Utc;
use diesel::prelude::*;

use crate::domain::beer_order::{BeerOrder, NewBeerOrder};
use crate::domain::types::{BeerOrderId, CustomerId, RecordVersion};
use crate::models::beer_order::{BeerOrder as DbBeerOrder, NewBeerOrder as DbNewBeerOrder};
use crate::repository::{BeerOrderReader, BeerOrderWriter, DieselRepository, RepositoryResult};

impl BeerOrderReader for DieselRepository {
    fn list_orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> RepositoryResult<Vec<BeerOrder>> {
        use crate::schema::beer_orders;

        let mut conn = self.conn()?;

        let items = beer_orders::table
            .filter(beer_orders::customer_id.eq(customer_id.to_string()))
            .order((beer_orders::created_at.asc(), beer_orders::id.asc()))
            .load::<DbBeerOrder>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<BeerOrder>, _>>()?;

        Ok(items)
    }
}

impl BeerOrderWriter for DieselRepository {
    fn create_beer_order(&self, order: &NewBeerOrder) -> RepositoryResult<BeerOrder> {
        use crate::schema::beer_orders;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let row = DbNewBeerOrder {
            id: BeerOrderId::generate().to_string(),
            version: RecordVersion::INITIAL.get(),
            customer_id: order.customer_id.to_string(),
            customer_ref: order.customer_ref.as_deref(),
            created_at: now,
            updated_at: now,
        };

        let inserted = diesel::insert_into(beer_orders::table)
            .values(row)
            .get_result::<DbBeerOrder>(&mut conn)?;

        Ok(inserted.try_into()?)
    }
}
