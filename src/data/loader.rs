//! CSV Loader
//!
//! Reads the dataset into a [`BaseTable`]. Columns are resolved by header
//! name, so column order and extra columns in the file do not matter.
//! Dates follow the day-before-month convention.

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use super::error::{LoadError, LoadResult};
use super::table::BaseTable;
use super::types::{Metric, Observation};

/// Accepted date formats, day-first before ISO
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// Cell markers read as a missing value (the pandas `read_csv` default set)
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Header positions of the columns the table needs
struct ColumnMap {
    location: usize,
    continent: usize,
    date: usize,
    metrics: Vec<(Metric, usize)>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> LoadResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };

        let metrics = Metric::all()
            .iter()
            .map(|m| find(m.key()).map(|idx| (*m, idx)))
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Self {
            location: find("location")?,
            continent: find("continent")?,
            date: find("date")?,
            metrics,
        })
    }
}

/// Load the base table from a CSV file
pub fn load(path: impl AsRef<Path>) -> LoadResult<BaseTable> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading dataset");

    let file = std::fs::File::open(path)?;
    let table = load_from_reader(file)?;

    let stats = table.stats();
    tracing::info!(
        rows = stats.rows,
        dropped_aggregates = stats.dropped_aggregates,
        countries = stats.countries,
        "Dataset loaded"
    );
    if let Some((start, end)) = table.date_bounds() {
        tracing::info!(%start, %end, "Date bounds");
    }

    Ok(table)
}

/// Load the base table from any reader (files, in-memory buffers)
pub fn load_from_reader<R: Read>(reader: R) -> LoadResult<BaseTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for (line_num, result) in reader.records().enumerate() {
        // Header is line 1
        let line = line_num as u64 + 2;
        let record = result?;

        let continent = record.get(columns.continent).unwrap_or("").trim();
        if continent.is_empty() {
            dropped += 1;
            continue;
        }

        let date_str = record.get(columns.date).unwrap_or("").trim();
        let date = parse_day_first(date_str).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: date_str.to_string(),
        })?;

        let location = record.get(columns.location).unwrap_or("").trim();
        let mut obs = Observation::new(location, continent, date);

        for (metric, idx) in &columns.metrics {
            let cell = record.get(*idx).unwrap_or("");
            *obs.slot_mut(*metric) =
                parse_metric_cell(cell).map_err(|_| LoadError::InvalidNumber {
                    line,
                    column: metric.key().to_string(),
                    value: cell.trim().to_string(),
                })?;
        }

        rows.push(obs);
    }

    if dropped > 0 {
        tracing::debug!(dropped, "Dropped rows without a continent");
    }

    Ok(BaseTable::new(rows, dropped))
}

/// Parse one metric cell; blanks, missing markers and non-finite numbers are `None`
fn parse_metric_cell(cell: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let cell = cell.trim();
    if cell.is_empty() || MISSING_MARKERS.contains(&cell) {
        return Ok(None);
    }
    let value = cell.parse::<f64>()?;
    Ok(value.is_finite().then_some(value))
}

/// Parse a date string, reading ambiguous forms as day-before-month
pub fn parse_day_first(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
