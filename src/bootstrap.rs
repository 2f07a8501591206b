//! Sample data loaded at startup.

use std::path::Path;

use thiserror::Error;

use crate::domain::beer::NewBeer;
use crate::domain::customer::NewCustomer;
use crate::domain::types::{
    BeerName, BeerPrice, BeerStyle, CustomerName, QuantityOnHand, TypeConstraintError, Upc,
};
use crate::repository::{BeerReader, BeerWriter, CustomerReader, CustomerWriter, RepositoryError};
use crate::services::import_export::{CsvImportError, import_beers};

/// The CSV file is only imported while the catalogue holds fewer beers.
pub const CSV_IMPORT_THRESHOLD: usize = 10;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    InvalidSeed(#[from] TypeConstraintError),
    #[error(transparent)]
    Import(#[from] CsvImportError),
}

fn sample_beers() -> Result<Vec<NewBeer>, TypeConstraintError> {
    [
        ("Galaxy Cat", BeerStyle::PaleAle, "123456", "12.99", 122),
        ("Crank", BeerStyle::PaleAle, "12332435", "11.99", 392),
        ("Sunshine City", BeerStyle::Ipa, "123456", "13.99", 144),
    ]
    .into_iter()
    .map(|(name, style, upc, price, quantity)| {
        Ok(NewBeer {
            name: BeerName::new(name)?,
            style,
            upc: Upc::new(upc)?,
            quantity_on_hand: Some(QuantityOnHand::new(quantity)?),
            price: BeerPrice::parse(price)?,
        })
    })
    .collect()
}

fn sample_customers() -> Result<Vec<NewCustomer>, TypeConstraintError> {
    ["John Spring", "Eva Blue", "Joseph Carter"]
        .into_iter()
        .map(|name| {
            Ok(NewCustomer {
                name: CustomerName::new(name)?,
                email: None,
            })
        })
        .collect()
}

/// Insert the sample beers and customers into empty tables, then top up the
/// catalogue from `beer_csv_path` if it is still small.
pub fn load_seed_data<R>(repo: &R, beer_csv_path: Option<&Path>) -> Result<(), BootstrapError>
where
    R: BeerReader + BeerWriter + CustomerReader + CustomerWriter,
{
    if repo.count_beers()? == 0 {
        let created = repo.create_beers(&sample_beers()?)?;
        log::info!("Seeded {created} beers");
    }

    if repo.count_customers()? == 0 {
        for customer in sample_customers()? {
            repo.create_customer(&customer)?;
        }
        log::info!("Seeded sample customers");
    }

    if let Some(path) = beer_csv_path
        && repo.count_beers()? < CSV_IMPORT_THRESHOLD
    {
        let report = import_beers(path, repo)?;
        for error in &report.errors {
            log::warn!(
                "Skipped CSV row {} ({}): {}",
                error.row_number,
                error.name.as_deref().unwrap_or("-"),
                error.message
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::repository::MemoryRepository;

    #[test]
    fn seeds_empty_store_once() {
        let repo = MemoryRepository::new();
        load_seed_data(&repo, None).unwrap();
        load_seed_data(&repo, None).unwrap();

        assert_eq!(repo.count_beers().unwrap(), 3);
        assert_eq!(repo.count_customers().unwrap(), 3);
    }

    #[test]
    fn imports_csv_while_catalogue_is_small() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,style,upc,price,quantity").unwrap();
        writeln!(file, "Dark Side,STOUT,555,8.00,5").unwrap();

        let repo = MemoryRepository::new();
        load_seed_data(&repo, Some(file.path())).unwrap();
        assert_eq!(repo.count_beers().unwrap(), 4);
    }

    #[test]
    fn missing_csv_is_an_error() {
        let repo = MemoryRepository::new();
        let result = load_seed_data(&repo, Some(Path::new("/nope/beers.csv")));
        assert!(matches!(result, Err(BootstrapError::Import(_))));
    }
}
