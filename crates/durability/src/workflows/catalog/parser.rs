use crate::workflows::sustainability::{
    ProductField, ProductInput, ValidationError, ValidationReason,
};
use serde::Deserialize;
use std::io::Read;

const MATERIAL_SEPARATOR: char = ';';

/// One data row of a product catalog, with its 1-based line in the source file.
#[derive(Debug)]
pub struct CatalogEntry {
    pub line: u64,
    pub product: Result<ProductInput, ValidationError>,
}

pub(crate) fn parse_entries<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        let row: ProductRow = record.deserialize(Some(&headers))?;
        rows.push(row.into_catalog_row(line));
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    product_name: String,
    #[serde(default)]
    materials: String,
    weight_grams: String,
    transport: String,
    packaging: String,
}

impl ProductRow {
    fn into_catalog_row(self, line: u64) -> CatalogEntry {
        let product = self.weight().map(|weight_grams| ProductInput {
            materials: split_materials(&self.materials),
            product_name: self.product_name,
            weight_grams,
            transport: self.transport,
            packaging: self.packaging,
        });

        CatalogEntry { line, product }
    }

    fn weight(&self) -> Result<f64, ValidationError> {
        self.weight_grams
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError {
                field: ProductField::WeightGrams,
                reason: ValidationReason::WrongType { expected: "number" },
            })
    }
}

fn split_materials(raw: &str) -> Vec<String> {
    raw.split(MATERIAL_SEPARATOR)
        .map(str::trim)
        .filter(|material| !material.is_empty())
        .map(str::to_string)
        .collect()
}
