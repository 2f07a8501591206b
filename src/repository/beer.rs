use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::beer::{Beer, NewBeer, UpdateBeer};
use crate::domain::types::{BeerId, CategoryId, QuantityOnHand, RecordVersion, fold_case};
use crate::models::beer::{Beer as DbBeer, BeerCategory as DbBeerCategory, NewBeer as DbNewBeer};
use crate::repository::{
    BeerListQuery, BeerReader, BeerWriter, DieselRepository, RepositoryResult, sql_window,
};

/// Convert rows into domain beers, attaching their category links.
fn hydrate_beers(conn: &mut DbConnection, rows: Vec<DbBeer>) -> RepositoryResult<Vec<Beer>> {
    use crate::schema::beer_categories;

    if rows.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    let links = beer_categories::table
        .filter(beer_categories::beer_id.eq_any(ids))
        .load::<DbBeerCategory>(conn)?;

    let mut categories_by_beer: HashMap<String, BTreeSet<CategoryId>> = HashMap::new();
    for link in links {
        categories_by_beer
            .entry(link.beer_id)
            .or_default()
            .insert(CategoryId::parse(&link.category_id)?);
    }

    rows.into_iter()
        .map(|row| {
            let categories = categories_by_beer.remove(&row.id).unwrap_or_default();
            let mut beer = Beer::try_from(row)?;
            beer.categories = categories;
            Ok(beer)
        })
        .collect()
}

/// `LIKE` pattern matching `term` literally anywhere in the value.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn hydrate_beer(conn: &mut DbConnection, row: DbBeer) -> RepositoryResult<Option<Beer>> {
    Ok(hydrate_beers(conn, vec![row])?.into_iter().next())
}

impl BeerReader for DieselRepository {
    fn list_beers(&self, query: BeerListQuery) -> RepositoryResult<(usize, Vec<Beer>)> {
        use crate::schema::beers;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = beers::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(name) = &query.name {
                items = items.filter(
                    beers::search_name
                        .like(contains_pattern(&fold_case(name)))
                        .escape('\\'),
                );
            }

            if let Some(style) = query.style {
                items = items.filter(beers::style.eq(style.as_str()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((beers::name.asc(), beers::id.asc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = sql_window(pagination);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbBeer>(&mut conn)?;
        let items = hydrate_beers(&mut conn, rows)?;

        Ok((total, items))
    }

    fn get_beer_by_id(&self, id: BeerId) -> RepositoryResult<Option<Beer>> {
        use crate::schema::beers;

        let mut conn = self.conn()?;

        let row = beers::table
            .find(id.to_string())
            .first::<DbBeer>(&mut conn)
            .optional()?;

        match row {
            Some(row) => hydrate_beer(&mut conn, row),
            None => Ok(None),
        }
    }

    fn count_beers(&self) -> RepositoryResult<usize> {
        use crate::schema::beers;

        let mut conn = self.conn()?;
        let total = beers::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

fn new_beer_row(beer: &NewBeer) -> DbNewBeer<'_> {
    let now = Utc::now().naive_utc();
    DbNewBeer {
        id: BeerId::generate().to_string(),
        version: RecordVersion::INITIAL.get(),
        name: beer.name.as_str(),
        style: beer.style.as_str(),
        upc: beer.upc.as_str(),
        quantity_on_hand: beer.quantity_on_hand.map(QuantityOnHand::get),
        price: beer.price.to_string(),
        created_at: now,
        updated_at: now,
        search_name: beer.name.search_key(),
    }
}

impl BeerWriter for DieselRepository {
    fn create_beer(&self, beer: &NewBeer) -> RepositoryResult<Beer> {
        use crate::schema::beers;

        let mut conn = self.conn()?;

        let row = diesel::insert_into(beers::table)
            .values(new_beer_row(beer))
            .get_result::<DbBeer>(&mut conn)?;

        Ok(Beer::try_from(row)?)
    }

    fn create_beers(&self, new_beers: &[NewBeer]) -> RepositoryResult<usize> {
        use crate::schema::beers;

        let mut conn = self.conn()?;
        let rows = new_beers.iter().map(new_beer_row).collect::<Vec<_>>();

        let affected = conn.transaction(|conn| {
            diesel::insert_into(beers::table)
                .values(&rows)
                .execute(conn)
        })?;

        Ok(affected)
    }

    fn update_beer(&self, id: BeerId, beer: &UpdateBeer) -> RepositoryResult<Option<Beer>> {
        use crate::schema::beers;

        let mut conn = self.conn()?;

        let row = diesel::update(beers::table.find(id.to_string()))
            .set((
                beers::name.eq(beer.name.as_str()),
                beers::search_name.eq(beer.name.search_key()),
                beers::style.eq(beer.style.as_str()),
                beers::upc.eq(beer.upc.as_str()),
                beers::quantity_on_hand.eq(beer.quantity_on_hand.map(QuantityOnHand::get)),
                beers::price.eq(beer.price.to_string()),
                beers::version.eq(beers::version + 1),
                beers::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbBeer>(&mut conn)
            .optional()?;

        match row {
            Some(row) => hydrate_beer(&mut conn, row),
            None => Ok(None),
        }
    }

    fn delete_beer(&self, id: BeerId) -> RepositoryResult<usize> {
        use crate::schema::{beer_categories, beers};

        let mut conn = self.conn()?;
        let id = id.to_string();

        let affected = conn.transaction(|conn| {
            diesel::delete(beer_categories::table.filter(beer_categories::beer_id.eq(id.as_str())))
                .execute(conn)?;
            diesel::delete(beers::table.find(id.as_str())).execute(conn)
        })?;

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(contains_pattern("ipa"), "%ipa%");
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
