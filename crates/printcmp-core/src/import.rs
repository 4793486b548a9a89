//! Parsing of the semicolon-separated offer export the catalog is loaded from.
//!
//! The export has a header row with Spanish column names, standard CSV
//! quoting, decimal commas, and `VERDADERO`/`FALSO` booleans.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::offers::Offer;

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "categoria",
    "producto",
    "cantidad",
    "imprenta",
    "precio_principal",
    "disponible",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("offer file is empty")]
    Empty,
    #[error("offer file header is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("line {line}: empty offer id")]
    MissingId { line: usize },
    #[error("line {line}: malformed record: {message}")]
    Malformed { line: usize, message: String },
}

/// Result of parsing an export: the offers plus the 1-based line numbers of
/// rows skipped for having fewer fields than the header.
#[derive(Debug, Default)]
pub struct ParsedOffers {
    pub offers: Vec<Offer>,
    pub skipped_lines: Vec<usize>,
}

/// Parses a full export into offers.
///
/// # Errors
///
/// Returns [`ImportError`] if the file has no header, the header lacks a
/// required column, a record cannot be read, or a row has a blank id.
pub fn parse_offers_csv(content: &str) -> Result<ParsedOffers, ImportError> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let header = reader.headers().map_err(|e| malformed(1, &e))?.clone();
    let columns: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_lowercase(), i))
        .collect();

    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(*required) {
            return Err(ImportError::MissingColumn(*required));
        }
    }

    let mut parsed = ParsedOffers::default();

    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, record_line);
            malformed(line, &e)
        })?;
        let line_no = record.position().map_or(0, record_line);

        if record.len() < header.len() {
            tracing::warn!(line = line_no, fields = record.len(), "skipping short row");
            parsed.skipped_lines.push(line_no);
            continue;
        }

        let row = Row {
            columns: &columns,
            values: &record,
        };
        let id = row.text("id").ok_or(ImportError::MissingId { line: line_no })?;

        parsed.offers.push(Offer {
            id,
            category: row.text("categoria").unwrap_or_default(),
            product_name: row.text("producto").unwrap_or_default(),
            format: row.text("formato_mm"),
            paper: row.text("papel"),
            weight: row.text("gramaje_g"),
            finish: row.text("acabado"),
            folder_type: row.text("tipo_de_carpeta"),
            quantity: row.raw("cantidad").map_or(0, parse_quantity),
            vendor_slug: row.text("imprenta").unwrap_or_default(),
            range: row.text("gama"),
            product_price: row.raw("precio_producto").and_then(parse_decimal),
            shipping_price: row.raw("precio_envio").and_then(parse_decimal),
            total_price_excl_tax: row.raw("precio_total_sin_iva").and_then(parse_decimal),
            total_price_incl_tax: row.raw("precio_total_con_iva").and_then(parse_decimal),
            primary_price: row.raw("precio_principal").and_then(parse_decimal),
            delivery_min_days: row.raw("plazo_min_dias").and_then(parse_days),
            delivery_max_days: row.raw("plazo_max_dias").and_then(parse_days),
            available: row.raw("disponible").is_some_and(parse_bool),
            notes: row.text("observaciones"),
        });
    }

    Ok(parsed)
}

fn record_line(position: &csv::Position) -> usize {
    usize::try_from(position.line()).unwrap_or(usize::MAX)
}

fn malformed(line: usize, error: &csv::Error) -> ImportError {
    ImportError::Malformed {
        line,
        message: error.to_string(),
    }
}

struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    values: &'a csv::StringRecord,
}

impl Row<'_> {
    fn raw(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(|&i| self.values.get(i))
    }

    fn text(&self, column: &str) -> Option<String> {
        self.raw(column)
            .filter(|v| !v.is_empty())
            .map(ToOwned::to_owned)
    }
}

/// Accepts a decimal comma. Blank or unparseable input is `None`.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(&raw.replacen(',', ".", 1)).ok()
}

fn parse_days(raw: &str) -> Option<i32> {
    parse_decimal(raw).and_then(|d| d.trunc().to_i32())
}

/// Unparseable quantities become 0, which no query can match.
fn parse_quantity(raw: &str) -> i32 {
    raw.trim()
        .parse::<i32>()
        .ok()
        .or_else(|| parse_days(raw))
        .unwrap_or(0)
}

fn parse_bool(raw: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case("verdadero") || raw.eq_ignore_ascii_case("true")
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
