use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConnection;
use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{BeerId, CategoryId, RecordVersion};
use crate::models::beer::BeerCategory as DbBeerCategory;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, RepositoryError, RepositoryResult,
};

/// Convert rows into domain categories, attaching the beers tagged with them.
fn hydrate_categories(
    conn: &mut DbConnection,
    rows: Vec<DbCategory>,
) -> RepositoryResult<Vec<Category>> {
    use crate::schema::beer_categories;

    if rows.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
    let links = beer_categories::table
        .filter(beer_categories::category_id.eq_any(ids))
        .load::<DbBeerCategory>(conn)?;

    let mut beers_by_category: HashMap<String, BTreeSet<BeerId>> = HashMap::new();
    for link in links {
        beers_by_category
            .entry(link.category_id)
            .or_default()
            .insert(BeerId::parse(&link.beer_id)?);
    }

    rows.into_iter()
        .map(|row| {
            let beers = beers_by_category.remove(&row.id).unwrap_or_default();
            let mut category = Category::try_from(row)?;
            category.beers = beers;
            Ok(category)
        })
        .collect()
}

/// Fail with `NotFound` unless both ends of a link exist.
fn ensure_link_ends(conn: &mut DbConnection, beer_id: &str, category_id: &str) -> QueryResult<()> {
    use crate::schema::{beers, categories};

    beers::table
        .find(beer_id)
        .select(beers::id)
        .first::<String>(conn)?;
    categories::table
        .find(category_id)
        .select(categories::id)
        .first::<String>(conn)?;
    Ok(())
}

/// Bump version and modification time of both ends after the link changed.
fn touch_link_ends(conn: &mut DbConnection, beer_id: &str, category_id: &str) -> QueryResult<()> {
    use crate::schema::{beers, categories};

    let now = Utc::now().naive_utc();
    diesel::update(beers::table.find(beer_id))
        .set((
            beers::version.eq(beers::version + 1),
            beers::updated_at.eq(now),
        ))
        .execute(conn)?;
    diesel::update(categories::table.find(category_id))
        .set((
            categories::version.eq(categories::version + 1),
            categories::updated_at.eq(now),
        ))
        .execute(conn)?;
    Ok(())
}

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let rows = categories::table
            .order((categories::description.asc(), categories::id.asc()))
            .load::<DbCategory>(&mut conn)?;

        hydrate_categories(&mut conn, rows)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let row = categories::table
            .find(id.to_string())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(hydrate_categories(&mut conn, vec![row])?.into_iter().next()),
            None => Ok(None),
        }
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let row = DbNewCategory {
            id: CategoryId::generate().to_string(),
            version: RecordVersion::INITIAL.get(),
            description: category.description.as_str(),
            created_at: now,
            updated_at: now,
        };

        let inserted = diesel::insert_into(categories::table)
            .values(row)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(inserted.try_into()?)
    }

    fn add_beer_category(
        &self,
        beer_id: BeerId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize> {
        use crate::schema::beer_categories;

        let mut conn = self.conn()?;
        let link = DbBeerCategory {
            beer_id: beer_id.to_string(),
            category_id: category_id.to_string(),
        };

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            ensure_link_ends(conn, &link.beer_id, &link.category_id)?;

            let inserted = diesel::insert_or_ignore_into(beer_categories::table)
                .values(&link)
                .execute(conn)?;

            if inserted > 0 {
                touch_link_ends(conn, &link.beer_id, &link.category_id)?;
            }
            Ok(inserted)
        })?;

        Ok(affected)
    }

    fn remove_beer_category(
        &self,
        beer_id: BeerId,
        category_id: CategoryId,
    ) -> RepositoryResult<usize> {
        use crate::schema::beer_categories;

        let mut conn = self.conn()?;
        let beer_id = beer_id.to_string();
        let category_id = category_id.to_string();

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            ensure_link_ends(conn, &beer_id, &category_id)?;

            let removed = diesel::delete(
                beer_categories::table
                    .filter(beer_categories::beer_id.eq(beer_id.as_str()))
                    .filter(beer_categories::category_id.eq(category_id.as_str())),
            )
            .execute(conn)?;

            if removed > 0 {
                touch_link_ends(conn, &beer_id, &category_id)?;
            }
            Ok(removed)
        })?;

        Ok(affected)
    }
}
