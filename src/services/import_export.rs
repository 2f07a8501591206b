use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::beer::NewBeer;
use crate::domain::types::{BeerName, BeerPrice, QuantityOnHand, TypeConstraintError, Upc};
use crate::repository::BeerWriter;

/// One row of the beer CSV file (`name,style,upc,price,quantity`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BeerCsvRecord {
    pub name: String,
    pub style: String,
    pub upc: String,
    pub price: String,
    pub quantity: Option<i32>,
}

impl TryFrom<BeerCsvRecord> for NewBeer {
    type Error = TypeConstraintError;

    fn try_from(record: BeerCsvRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: BeerName::new(record.name)?,
            style: record.style.parse()?,
            upc: Upc::new(record.upc)?,
            quantity_on_hand: record.quantity.map(QuantityOnHand::new).transpose()?,
            price: BeerPrice::parse(&record.price)?,
        })
    }
}

#[derive(Debug, Error)]
pub enum CsvImportError {
    /// The file could not be opened. Nothing was read.
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv at line {line}: {source}")]
    Parse {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("failed to store imported beers: {0}")]
    Store(String),
}

/// Row-level import error.
#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    pub row_number: usize,
    pub name: Option<String>,
    pub message: String,
}

/// Aggregated import outcome.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn with_total(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Self::default()
        }
    }

    pub fn push_error(&mut self, row_number: usize, name: Option<String>, message: impl Into<String>) {
        self.skipped += 1;
        self.errors.push(ImportRowError {
            row_number,
            name,
            message: message.into(),
        });
    }
}

/// Parse every row of the beer CSV file at `path`.
pub fn convert_csv(path: impl AsRef<Path>) -> Result<Vec<BeerCsvRecord>, CsvImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CsvImportError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut records = Vec::new();
    for row in reader.deserialize::<BeerCsvRecord>() {
        let record = row.map_err(|source| CsvImportError::Parse {
            line: source.position().map(|p| p.line()).unwrap_or_default(),
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Load the CSV file at `path` and store every valid row as a new beer.
///
/// Invalid rows are reported and skipped; valid rows are inserted together.
pub fn import_beers<R>(path: impl AsRef<Path>, repo: &R) -> Result<ImportReport, CsvImportError>
where
    R: BeerWriter,
{
    let records = convert_csv(path)?;
    let mut report = ImportReport::with_total(records.len());

    let mut new_beers = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        // Header is line 1.
        let row_number = index + 2;
        let name = record.name.clone();
        match NewBeer::try_from(record) {
            Ok(beer) => new_beers.push(beer),
            Err(e) => report.push_error(row_number, Some(name), e.to_string()),
        }
    }

    if !new_beers.is_empty() {
        report.created = repo
            .create_beers(&new_beers)
            .map_err(|e| CsvImportError::Store(e.to_string()))?;
    }

    log::info!(
        "Imported {} of {} beers ({} skipped)",
        report.created,
        report.total_rows,
        report.skipped
    );
    Ok(report)
}
