//! Base Table
//!
//! Immutable, load-time-filtered dataset plus the option lists derived from
//! it. Built once by the loader, then shared read-only for the life of the
//! process.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::types::Observation;

/// The country-level dataset
#[derive(Debug, Clone)]
pub struct BaseTable {
    /// Rows in source order
    rows: Vec<Observation>,
    /// Row indices per location, each list in source order
    by_location: BTreeMap<String, Vec<usize>>,
    /// Sorted distinct locations
    countries: Vec<String>,
    /// (min, max) date over all rows
    bounds: Option<(NaiveDate, NaiveDate)>,
    /// Aggregate rows removed at load
    dropped_aggregates: usize,
}

/// Summary counts for logging and health reporting
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TableStats {
    pub rows: usize,
    pub dropped_aggregates: usize,
    pub countries: usize,
}

impl BaseTable {
    /// Build a table from rows that already carry a continent
    pub fn new(rows: Vec<Observation>, dropped_aggregates: usize) -> Self {
        let mut by_location: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_location.entry(row.location.clone()).or_default().push(idx);
        }

        let countries = by_location.keys().cloned().collect();

        let bounds = rows.iter().map(|r| r.date).fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        });

        Self {
            rows,
            by_location,
            countries,
            bounds,
            dropped_aggregates,
        }
    }

    /// All retained rows in source order
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct country names
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn has_country(&self, country: &str) -> bool {
        self.by_location.contains_key(country)
    }

    /// Rows of one country in source order; empty if the country is unknown
    pub fn rows_for<'a>(&'a self, country: &str) -> impl Iterator<Item = &'a Observation> + 'a {
        self.by_location
            .get(country)
            .map(|idx| idx.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.rows[i])
    }

    /// Earliest and latest date, or `None` for an empty table
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.bounds
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            rows: self.rows.len(),
            dropped_aggregates: self.dropped_aggregates,
            countries: self.countries.len(),
        }
    }
}
