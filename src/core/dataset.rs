use crate::core::error::{DeckError, Result};
use crate::core::model::{BoroughFilter, Listing, strip_for_sale};
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 6] = [
    "price",
    "beds",
    "baths",
    "propertysqft",
    "sublocality",
    "type",
];

#[derive(Debug, Deserialize)]
struct RawListing {
    price: String,
    beds: String,
    baths: String,
    propertysqft: String,
    sublocality: String,
    #[serde(default)]
    street_name: String,
    #[serde(rename = "type")]
    property_type: String,
}

/// The parsed listing table, shared by every slide.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub listings: Vec<Listing>,
}

impl Dataset {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Distinct boroughs in order of first appearance.
    pub fn boroughs(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for l in &self.listings {
            if seen.insert(l.borough.as_str()) {
                out.push(l.borough.clone());
            }
        }
        out
    }

    pub fn filtered(&self, filter: &BoroughFilter) -> Vec<&Listing> {
        self.listings.iter().filter(|l| filter.matches(l)).collect()
    }
}

/// Parses listings from CSV text. `source` only labels errors.
pub fn parse_listings<R: Read>(reader: R, source: &Path) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let headers = normalize_headers(
        rdr.headers()
            .map_err(|e| DeckError::data_load(source, e))?,
    );
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DeckError::Parse {
                row: 0,
                field: column,
                value: "<missing column>".to_string(),
            });
        }
    }

    let mut listings = Vec::new();
    let mut record = StringRecord::new();
    let mut row = 0usize;
    loop {
        let more = rdr
            .read_record(&mut record)
            .map_err(|e| DeckError::data_load(source, e))?;
        if !more {
            break;
        }
        row += 1;
        let raw: RawListing = record
            .deserialize(Some(&headers))
            .map_err(|e| DeckError::data_load(source, format!("row {row}: {e}")))?;
        listings.push(coerce(row, raw)?);
    }
    Ok(Dataset::new(listings))
}

/// Lowercases headers; the shipped file spells the baths column `bath`.
fn normalize_headers(raw: &StringRecord) -> StringRecord {
    let lowered: Vec<String> = raw.iter().map(|h| h.trim().to_ascii_lowercase()).collect();
    let has_baths = lowered.iter().any(|h| h == "baths");
    lowered
        .into_iter()
        .map(|h| if h == "bath" && !has_baths { "baths".to_string() } else { h })
        .collect()
}

fn coerce(row: usize, raw: RawListing) -> Result<Listing> {
    Ok(Listing {
        price: parse_number(row, "price", &raw.price)?,
        beds: parse_number(row, "beds", &raw.beds)?,
        baths: parse_number(row, "baths", &raw.baths)?,
        property_sqft: parse_number(row, "propertysqft", &raw.propertysqft)?,
        borough: raw.sublocality.trim().to_string(),
        street_name: raw.street_name.trim().to_string(),
        property_type: strip_for_sale(&raw.property_type),
    })
}

fn parse_number(row: usize, field: &'static str, raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DeckError::Parse {
            row,
            field,
            value: raw.to_string(),
        }),
    }
}
