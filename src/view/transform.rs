//! Selection → series transform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::{Series, SeriesPoint};
use crate::data::{AxisScale, BaseTable, Metric, Observation, ViewMode};

/// The dashboard controls at the moment of a render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderRequest {
    pub country: String,
    pub metric: Metric,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub log_scale: bool,
    #[serde(default)]
    pub view_mode: ViewMode,
}

impl RenderRequest {
    /// Request covering the given range in daily, linear view
    pub fn new(
        country: impl Into<String>,
        metric: Metric,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            country: country.into(),
            metric,
            start_date,
            end_date,
            log_scale: false,
            view_mode: ViewMode::Daily,
        }
    }

    /// Builder: toggle the log-scale y-axis
    pub fn log_scale(mut self, log_scale: bool) -> Self {
        self.log_scale = log_scale;
        self
    }

    /// Builder: set the view mode
    pub fn view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// Chart title, e.g. "New Cases in India"
    pub fn title(&self) -> String {
        format!("{} in {}", self.metric.label(), self.country)
    }

    fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Produce the series for one selection
///
/// Unknown countries and inverted date ranges yield an empty series.
/// In cumulative mode rows are ordered by date and empty or non-finite
/// cells count as 0.
pub fn render(table: &BaseTable, request: &RenderRequest) -> Series {
    let metric = request.metric;

    let mut selected: Vec<&Observation> = table
        .rows_for(&request.country)
        .filter(|row| request.contains(row.date))
        .collect();

    let points = match request.view_mode {
        ViewMode::Daily => selected
            .iter()
            .map(|row| SeriesPoint {
                date: row.date,
                value: row.value(metric),
            })
            .collect(),
        ViewMode::Cumulative => {
            selected.sort_by_key(|row| row.date);
            selected
                .iter()
                .scan(0.0_f64, |total, row| {
                    *total += row.value(metric).filter(|v| v.is_finite()).unwrap_or(0.0);
                    Some(SeriesPoint {
                        date: row.date,
                        value: Some(*total),
                    })
                })
                .collect()
        }
    };

    tracing::debug!(
        country = %request.country,
        metric = %metric,
        view = %request.view_mode,
        points = selected.len(),
        "Rendered series"
    );

    Series {
        title: request.title(),
        country: request.country.clone(),
        metric,
        view_mode: request.view_mode,
        y_axis: AxisScale::from_log_flag(request.log_scale),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// India rows deliberately out of date order, plus a neighbour country
    fn table() -> BaseTable {
        BaseTable::new(
            vec![
                Observation::new("India", "Asia", ymd(2020, 3, 1))
                    .with(Metric::NewCases, 2.0)
                    .with(Metric::NewDeaths, 5.0),
                Observation::new("India", "Asia", ymd(2020, 3, 3))
                    .with(Metric::NewCases, 7.0),
                Observation::new("India", "Asia", ymd(2020, 3, 2))
                    .with(Metric::NewCases, 4.0),
                Observation::new("Nepal", "Asia", ymd(2020, 3, 2))
                    .with(Metric::NewCases, 100.0),
                Observation::new("India", "Asia", ymd(2020, 3, 4))
                    .with(Metric::NewCases, 0.0),
            ],
            0,
        )
    }

    fn full_range(country: &str, metric: Metric) -> RenderRequest {
        let (start, end) = table().date_bounds().unwrap();
        RenderRequest::new(country, metric, start, end)
    }

    #[test]
    fn test_daily_full_range() {
        let table = table();
        let series = render(&table, &full_range("India", Metric::NewCases));

        assert_eq!(series.len(), table.rows_for("India").count());
        assert_eq!(series.title, "New Cases in India");
        assert_eq!(series.y_axis, AxisScale::Linear);

        // Daily keeps source order
        let values: Vec<Option<f64>> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(2.0), Some(7.0), Some(4.0), Some(0.0)]);
    }

    #[test]
    fn test_inclusive_date_range() {
        let table = table();
        let request =
            RenderRequest::new("India", Metric::NewCases, ymd(2020, 3, 2), ymd(2020, 3, 3));
        let series = render(&table, &request);

        let dates: Vec<NaiveDate> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![ymd(2020, 3, 3), ymd(2020, 3, 2)]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let table = table();
        for view in [ViewMode::Daily, ViewMode::Cumulative] {
            let request =
                RenderRequest::new("India", Metric::NewCases, ymd(2020, 3, 4), ymd(2020, 3, 1))
                    .view_mode(view)
                    .log_scale(true);
            let series = render(&table, &request);
            assert!(series.is_empty());
            assert_eq!(series.y_axis, AxisScale::Log);
        }
    }

    #[test]
    fn test_unknown_country_is_empty() {
        let series = render(&table(), &full_range("Atlantis", Metric::NewCases));
        assert!(series.is_empty());
        assert_eq!(series.title, "New Cases in Atlantis");
    }

    #[test]
    fn test_cumulative_sorted_running_sum() {
        let table = table();
        let request = full_range("India", Metric::NewCases).view_mode(ViewMode::Cumulative);
        let series = render(&table, &request);

        let dates: Vec<NaiveDate> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![ymd(2020, 3, 1), ymd(2020, 3, 2), ymd(2020, 3, 3), ymd(2020, 3, 4)]
        );
        let values: Vec<Option<f64>> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(2.0), Some(6.0), Some(13.0), Some(13.0)]);
        assert!(series.points.windows(2).all(|w| w[0].value <= w[1].value));
    }

    #[test]
    fn test_cumulative_treats_null_as_zero() {
        let table = table();
        let request =
            RenderRequest::new("India", Metric::NewDeaths, ymd(2020, 3, 1), ymd(2020, 3, 2))
                .view_mode(ViewMode::Cumulative);
        let series = render(&table, &request);

        let values: Vec<Option<f64>> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(5.0), Some(5.0)]);
    }

    #[test]
    fn test_cumulative_skips_non_finite_values() {
        let table = BaseTable::new(
            vec![
                Observation::new("India", "Asia", ymd(2020, 3, 1)).with(Metric::NewDeaths, 5.0),
                Observation::new("India", "Asia", ymd(2020, 3, 2))
                    .with(Metric::NewDeaths, f64::NAN),
                Observation::new("India", "Asia", ymd(2020, 3, 3))
                    .with(Metric::NewDeaths, f64::INFINITY),
                Observation::new("India", "Asia", ymd(2020, 3, 4)).with(Metric::NewDeaths, 2.0),
            ],
            0,
        );
        let request =
            RenderRequest::new("India", Metric::NewDeaths, ymd(2020, 3, 1), ymd(2020, 3, 4))
                .view_mode(ViewMode::Cumulative);
        let series = render(&table, &request);

        let values: Vec<Option<f64>> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(5.0), Some(5.0), Some(5.0), Some(7.0)]);
    }

    #[test]
    fn test_all_null_metric_has_no_plottable_points() {
        let series = render(&table(), &full_range("India", Metric::PeopleVaccinated));
        assert_eq!(series.len(), 4);
        assert_eq!(series.plottable_len(), 0);
    }

    #[test]
    fn test_log_scale_passes_zero_through() {
        let request = full_range("India", Metric::NewCases).log_scale(true);
        let series = render(&table(), &request);
        assert_eq!(series.y_axis, AxisScale::Log);
        assert!(series.points.iter().any(|p| p.value == Some(0.0)));
    }

    #[test]
    fn test_render_is_idempotent() {
        let table = table();
        let request = full_range("India", Metric::NewCases).view_mode(ViewMode::Cumulative);

        let first = serde_json::to_string(&render(&table, &request)).unwrap();
        let second = serde_json::to_string(&render(&table, &request)).unwrap();
        assert_eq!(first, second);
        assert_eq!(table.len(), 5);
    }
}
