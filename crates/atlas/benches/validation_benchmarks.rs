//! Validation pipeline performance benchmarks.
//!
//! Measures parsing, full validation passes, and single-cell edits, which
//! revalidate the whole dataset.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Write;
use tempfile::NamedTempFile;

use atlas::{Atlas, CellValue, Parser, Session};

/// Generate sensor-style CSV with gaps, stray text and a few spikes.
fn generate_sensor_data(rows: usize) -> String {
    let mut data = String::new();
    data.push_str("reading_id,station,temperature,humidity,status\n");

    let stations = ["north", "south", "east", "west"];
    let statuses = ["ok", "ok", "ok", "degraded"];

    for row in 0..rows {
        data.push_str(&format!("{},", row + 1));
        data.push_str(stations[row % stations.len()]);
        data.push(',');
        // temperature with spikes and gaps
        if row % 97 == 0 {
            data.push_str("250.0");
        } else if row % 41 == 0 {
            data.push_str("NA");
        } else {
            data.push_str(&format!("{:.1}", 18.0 + (row % 15) as f64 * 0.4));
        }
        data.push(',');
        // humidity with the odd text value
        if row % 53 == 0 {
            data.push_str("unknown");
        } else {
            data.push_str(&format!("{}", 40 + row % 30));
        }
        data.push(',');
        data.push_str(statuses[row % statuses.len()]);
        data.push('\n');
    }

    data
}

/// Benchmark parsing alone.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = Parser::new();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_sensor_data(*rows);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("sensor_rows", rows), &data, |b, data| {
            b.iter(|| black_box(parser.parse_bytes(data.as_bytes(), b',').unwrap()))
        });
    }

    group.finish();
}

/// Benchmark a full validation pass over an in-memory dataset.
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let atlas = Atlas::new();
    let parser = Parser::new();

    for rows in [100, 1_000, 10_000, 100_000].iter() {
        let data = generate_sensor_data(*rows);
        let dataset = parser.parse_bytes(data.as_bytes(), b',').unwrap();

        group.throughput(Throughput::Elements(dataset.total_cells() as u64));
        group.bench_with_input(BenchmarkId::new("sensor_rows", rows), &dataset, |b, dataset| {
            b.iter_with_setup(|| dataset.clone(), |dataset| black_box(atlas.validate(dataset)))
        });
    }

    group.finish();
}

/// Benchmark load + validate from a file.
fn bench_analyze_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_file");
    group.sample_size(20);

    let atlas = Atlas::new();
    for rows in [1_000, 10_000].iter() {
        let data = generate_sensor_data(*rows);
        let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
        temp.write_all(data.as_bytes()).unwrap();

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("sensor_rows", rows), &temp, |b, temp| {
            b.iter(|| black_box(atlas.analyze(temp.path()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark a single-cell edit followed by revalidation.
fn bench_edit_cell(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_cell");
    group.sample_size(20);

    for rows in [1_000, 10_000].iter() {
        let data = generate_sensor_data(*rows);
        let dataset = Parser::new().parse_bytes(data.as_bytes(), b',').unwrap();

        let mut session = Session::new(Atlas::new());
        session.replace(dataset);

        let mut toggle = false;
        group.bench_function(BenchmarkId::new("sensor_rows", rows), |b| {
            b.iter(|| {
                toggle = !toggle;
                let value = if toggle {
                    CellValue::Float(999.0)
                } else {
                    CellValue::Float(20.0)
                };
                black_box(session.edit_cell(1, 2, value).unwrap().is_some())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_validate,
    bench_analyze_file,
    bench_edit_cell,
);
criterion_main!(benches);
