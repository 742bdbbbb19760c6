use crate::error::DatasetError;
use crate::error::Result;
use crate::record::Columns;
use crate::record::Dataset;
use crate::record::Record;
use log::warn;
use std::path::Path;
use std::path::PathBuf;

const AREA_COLUMN: &str = "area";
const YEAR_COLUMN: &str = "year";
const PRICE_COLUMN: &str = "price_per_sqft";
const SOLD_COLUMN: &str = "total_sold";
const SALES_COLUMN: &str = "total_sales_value";

/// Handle on the on-disk snapshot. `load` re-reads the file on every call;
/// there is deliberately no caching so concurrent requests never coordinate.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot, or `None` when the file does not exist. Parse and
    /// schema failures are reported as errors; `load` is the degrading
    /// wrapper most callers want.
    pub fn try_load(&self) -> Result<Option<Dataset>> {
        if !self.path.exists() {
            return Ok(None);
        }
        read_snapshot(&self.path).map(Some)
    }

    /// Read the snapshot, treating every failure as "no data": a missing,
    /// unreadable, or schema-invalid file yields `None` with the detail at
    /// warn level.
    pub fn load(&self) -> Option<Dataset> {
        match self.try_load() {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(
                    "dataset snapshot at {} is unusable: {err}",
                    self.path.display()
                );
                None
            }
        }
    }
}

fn read_snapshot(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let area_idx =
        find_column(&headers, AREA_COLUMN).ok_or(DatasetError::MissingColumn(AREA_COLUMN))?;
    let year_idx =
        find_column(&headers, YEAR_COLUMN).ok_or(DatasetError::MissingColumn(YEAR_COLUMN))?;
    let price_idx = find_column(&headers, PRICE_COLUMN);
    let sold_idx = find_column(&headers, SOLD_COLUMN);
    let sales_idx = find_column(&headers, SALES_COLUMN);
    let columns = Columns {
        price_per_sqft: price_idx.is_some(),
        total_sold: sold_idx.is_some(),
        total_sales_value: sales_idx.is_some(),
    };

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1, so data row `idx` sits on line `idx + 2`.
        let line = idx + 2;
        let area = match row.get(area_idx).map(str::trim) {
            Some(area) if !area.is_empty() => area.to_string(),
            _ => {
                warn!("skipping snapshot line {line}: empty `{AREA_COLUMN}` cell");
                continue;
            }
        };
        let Some(year) = cell(&row, Some(year_idx)).and_then(parse_int) else {
            warn!("skipping snapshot line {line}: unparseable `{YEAR_COLUMN}` cell");
            continue;
        };
        let Ok(year) = i32::try_from(year) else {
            warn!("skipping snapshot line {line}: `{YEAR_COLUMN}` out of range");
            continue;
        };
        records.push(Record {
            area,
            year,
            price_per_sqft: cell(&row, price_idx).and_then(parse_float),
            total_sold: cell(&row, sold_idx).and_then(parse_int),
            total_sales_value: cell(&row, sales_idx).and_then(parse_float),
        });
    }
    Ok(Dataset::new(records, columns))
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header.trim() == name)
}

fn cell<'a>(row: &'a csv::StringRecord, idx: Option<usize>) -> Option<&'a str> {
    let value = row.get(idx?)?.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn parse_int(cell: &str) -> Option<i64> {
    if let Ok(value) = cell.parse::<i64>() {
        return Some(value);
    }
    // Spreadsheet exports often render whole numbers as "2024.0".
    let value: f64 = cell.parse().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

fn parse_float(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|value| value.is_finite())
}
