//! Core data types for the COVID-19 data store
//!
//! This module defines the fundamental types shared by the loader and the
//! view transform:
//! - `Observation`: One country-level row for one date
//! - `Metric`: The fixed catalog of plottable columns
//! - `ViewMode` and `AxisScale`: Presentation choices for a series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::UnknownMetric;

/// A single (location, date) row of the base table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// Country name
    pub location: String,
    /// Continent name, never empty once loaded
    pub continent: String,
    /// Calendar date of the observation
    pub date: NaiveDate,
    pub new_cases: Option<f64>,
    pub new_deaths: Option<f64>,
    pub total_cases: Option<f64>,
    pub total_deaths: Option<f64>,
    pub people_vaccinated: Option<f64>,
    pub people_fully_vaccinated: Option<f64>,
}

impl Observation {
    /// Create an observation with every metric empty
    pub fn new(
        location: impl Into<String>,
        continent: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            location: location.into(),
            continent: continent.into(),
            date,
            new_cases: None,
            new_deaths: None,
            total_cases: None,
            total_deaths: None,
            people_vaccinated: None,
            people_fully_vaccinated: None,
        }
    }

    /// Builder method: set a metric value
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        *self.slot_mut(metric) = Some(value);
        self
    }

    /// Read the value of a metric column
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::NewCases => self.new_cases,
            Metric::NewDeaths => self.new_deaths,
            Metric::TotalCases => self.total_cases,
            Metric::TotalDeaths => self.total_deaths,
            Metric::PeopleVaccinated => self.people_vaccinated,
            Metric::PeopleFullyVaccinated => self.people_fully_vaccinated,
        }
    }

    pub(crate) fn slot_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        match metric {
            Metric::NewCases => &mut self.new_cases,
            Metric::NewDeaths => &mut self.new_deaths,
            Metric::TotalCases => &mut self.total_cases,
            Metric::TotalDeaths => &mut self.total_deaths,
            Metric::PeopleVaccinated => &mut self.people_vaccinated,
            Metric::PeopleFullyVaccinated => &mut self.people_fully_vaccinated,
        }
    }
}

/// Plottable metric columns, in catalog order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    NewCases,
    NewDeaths,
    TotalCases,
    TotalDeaths,
    PeopleVaccinated,
    PeopleFullyVaccinated,
}

impl Metric {
    /// Get all metrics in declaration order
    pub fn all() -> &'static [Metric] {
        &[
            Metric::NewCases,
            Metric::NewDeaths,
            Metric::TotalCases,
            Metric::TotalDeaths,
            Metric::PeopleVaccinated,
            Metric::PeopleFullyVaccinated,
        ]
    }

    /// Column name in the source file
    pub fn key(&self) -> &'static str {
        match self {
            Metric::NewCases => "new_cases",
            Metric::NewDeaths => "new_deaths",
            Metric::TotalCases => "total_cases",
            Metric::TotalDeaths => "total_deaths",
            Metric::PeopleVaccinated => "people_vaccinated",
            Metric::PeopleFullyVaccinated => "people_fully_vaccinated",
        }
    }

    /// Human-readable label used in selectors and chart titles
    pub fn label(&self) -> &'static str {
        match self {
            Metric::NewCases => "New Cases",
            Metric::NewDeaths => "New Deaths",
            Metric::TotalCases => "Total Cases",
            Metric::TotalDeaths => "Total Deaths",
            Metric::PeopleVaccinated => "People Vaccinated",
            Metric::PeopleFullyVaccinated => "Fully Vaccinated",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::all()
            .iter()
            .copied()
            .find(|m| m.key() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// How metric values are presented over time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Raw per-date values
    #[default]
    Daily,
    /// Running sum over the date-ordered selection
    Cumulative,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Daily => write!(f, "daily"),
            ViewMode::Cumulative => write!(f, "cumulative"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(ViewMode::Daily),
            "cumulative" => Ok(ViewMode::Cumulative),
            _ => Err(format!(
                "Invalid view mode: {}. Use daily or cumulative",
                s
            )),
        }
    }
}

/// Y-axis scale hint for the charting layer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

impl AxisScale {
    pub fn from_log_flag(log_scale: bool) -> Self {
        if log_scale {
            AxisScale::Log
        } else {
            AxisScale::Linear
        }
    }
}

impl std::fmt::Display for AxisScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisScale::Linear => write!(f, "linear"),
            AxisScale::Log => write!(f, "log"),
        }
    }
}
