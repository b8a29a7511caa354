use crate::domain::catalog::Catalog;
use crate::domain::item::Item;
use crate::error::{Result, VendingError};
use std::io::Read;

/// The machine's stock at power-on, compiled into the binary.
pub const SEED_CATALOG: &str = include_str!("seed_catalog.csv");

/// Reads `code,name,category,price,quantity` rows in file order.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    /// Wraps a CSV source that starts with a header row. Fields are trimmed.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Yields one `Item` per row. Codes are taken as written; [`Catalog::new`]
    /// rejects any that are not normalized.
    pub fn items(self) -> impl Iterator<Item = Result<Item>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VendingError::from))
    }

    /// Reads every row, failing on the first malformed one.
    pub fn into_catalog(self) -> Result<Catalog> {
        let items = self.items().collect::<Result<Vec<_>>>()?;
        Catalog::new(items)
    }
}

/// Builds a fresh catalog from the embedded seed table.
pub fn seed_catalog() -> Result<Catalog> {
    CatalogReader::new(SEED_CATALOG.as_bytes()).into_catalog()
}
