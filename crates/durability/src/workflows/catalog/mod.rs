mod parser;

pub use parser::CatalogEntry;

use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ProductImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ProductImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductImportError::Io(err) => write!(f, "failed to read product catalog: {}", err),
            ProductImportError::Csv(err) => write!(f, "invalid product catalog CSV: {}", err),
        }
    }
}

impl std::error::Error for ProductImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProductImportError::Io(err) => Some(err),
            ProductImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProductImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProductImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads product catalogs with the columns
/// `product_name,materials,weight_grams,transport,packaging`.
///
/// Materials are separated by `;`. Rows with an unparseable weight are returned
/// as per-row validation errors rather than failing the whole import.
pub struct ProductCsvImporter;

impl ProductCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogEntry>, ProductImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, ProductImportError> {
        Ok(parser::parse_entries(reader)?)
    }
}
