//! Chart-ready series emitted by the view transform

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::{AxisScale, Metric, ViewMode};

/// One x/y point; `value` is `None` where the source cell was empty
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A titled series with its rendering hint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Series {
    pub title: String,
    pub country: String,
    pub metric: Metric,
    pub view_mode: ViewMode,
    pub y_axis: AxisScale,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points that carry a value
    pub fn plottable_len(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Write the series as `date,<metric>` CSV, blank cells for nulls
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["date", self.metric.key()])?;

        for point in &self.points {
            let value = point.value.map(|v| v.to_string()).unwrap_or_default();
            writer.write_record([point.date.format("%Y-%m-%d").to_string(), value])?;
        }

        let bytes = writer.into_inner().map_err(|e| {
            csv::Error::from(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
