//! Benchmarks for the view transform
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use covid_dashboard::data::{BaseTable, Metric, Observation, ViewMode};
use covid_dashboard::view::{render, RenderRequest};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// Roughly the shape of the real dataset: ~200 countries × ~1000 days
fn create_test_table(countries: usize, days: usize) -> BaseTable {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let rows = (0..countries)
        .flat_map(|c| {
            (0..days).map(move |d| {
                let date = start + Duration::days(d as i64);
                let obs = Observation::new(format!("Country {}", c), "Europe", date);
                // Leave gaps so cumulative mode sees nulls
                if d % 7 == 0 {
                    obs
                } else {
                    obs.with(Metric::NewCases, (d % 50) as f64)
                }
            })
        })
        .collect();
    BaseTable::new(rows, 0)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for days in [100, 1000] {
        let table = create_test_table(200, days);
        let (start, end) = table.date_bounds().unwrap();

        group.throughput(Throughput::Elements(days as u64));

        let daily = RenderRequest::new("Country 42", Metric::NewCases, start, end);
        group.bench_function(format!("daily_{}", days), |b| {
            b.iter(|| render(black_box(&table), black_box(&daily)))
        });

        let cumulative = daily.clone().view_mode(ViewMode::Cumulative);
        group.bench_function(format!("cumulative_{}", days), |b| {
            b.iter(|| render(black_box(&table), black_box(&cumulative)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
