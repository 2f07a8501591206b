use chrono::Utc;
use diesel::prelude::*;

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerId, RecordVersion};
use crate::models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer};
use crate::repository::{
    CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository, RepositoryResult,
    sql_window,
};

impl CustomerReader for DieselRepository {
    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let total = customers::table
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = customers::table
            .into_boxed::<diesel::sqlite::Sqlite>()
            .order((customers::name.asc(), customers::id.asc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = sql_window(pagination);
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Customer>, _>>()?;

        Ok((total, items))
    }

    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let customer = customers::table
            .find(id.to_string())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        let customer = customer.map(TryInto::try_into).transpose()?;
        Ok(customer)
    }

    fn count_customers(&self) -> RepositoryResult<usize> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let total = customers::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let row = DbNewCustomer {
            id: CustomerId::generate().to_string(),
            version: RecordVersion::INITIAL.get(),
            name: customer.name.as_str(),
            email: customer.email.as_deref(),
            created_at: now,
            updated_at: now,
        };

        let inserted = diesel::insert_into(customers::table)
            .values(row)
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(inserted.try_into()?)
    }

    fn update_customer(
        &self,
        id: CustomerId,
        customer: &UpdateCustomer,
    ) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        let updated = diesel::update(customers::table.find(id.to_string()))
            .set((
                customers::name.eq(customer.name.as_str()),
                customers::email.eq(customer.email.as_deref()),
                customers::version.eq(customers::version + 1),
                customers::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbCustomer>(&mut conn)
            .optional()?;

        let updated = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }

    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<usize> {
        use crate::schema::{beer_orders, customers};

        let mut conn = self.conn()?;
        let id = id.to_string();

        let affected = conn.transaction(|conn| {
            diesel::delete(beer_orders::table.filter(beer_orders::customer_id.eq(id.as_str())))
                .execute(conn)?;
            diesel::delete(customers::table.find(id.as_str())).execute(conn)
        })?;

        Ok(affected)
    }
}
