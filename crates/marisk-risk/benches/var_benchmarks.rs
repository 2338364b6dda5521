//! Benchmarks for the marisk-risk estimators.
//!
//! Run with: cargo bench -p marisk-risk

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use chrono::NaiveDate;
use marisk_core::ReturnSeries;
use marisk_risk::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn create_returns(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| ((i * 7919 % 1009) as f64 - 504.0) / 25_000.0)
        .collect()
}

fn create_series(n: usize) -> ReturnSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    ReturnSeries::from_pairs(
        create_returns(n)
            .into_iter()
            .enumerate()
            .map(|(i, r)| (start + chrono::Days::new(i as u64), r)),
    )
    .expect("generated series is ordered")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_closed_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("var_closed_form");

    for size in [252, 1_260, 5_040].iter() {
        let returns = create_returns(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("historical", size), &returns, |b, r| {
            b.iter(|| historical_var(black_box(r), 0.95))
        });
        group.bench_with_input(BenchmarkId::new("parametric", size), &returns, |b, r| {
            b.iter(|| parametric_var(black_box(r), 0.95))
        });
        group.bench_with_input(BenchmarkId::new("cvar", size), &returns, |b, r| {
            b.iter(|| conditional_var(black_box(r), 0.95))
        });
    }
    group.finish();
}

fn bench_monte_carlo(c: &mut Criterion) {
    let returns = create_returns(1_260);
    let mut group = c.benchmark_group("var_monte_carlo");
    group.sample_size(30);

    for sims in [1_000, 10_000, 100_000].iter() {
        for model in [SimulationModel::Normal, SimulationModel::Bootstrap] {
            let config = MonteCarloConfig::default()
                .with_simulations(*sims)
                .with_model(model);
            group.throughput(Throughput::Elements(*sims as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{model:?}"), sims),
                &config,
                |b, config| {
                    let mut rng = StdRng::seed_from_u64(42);
                    b.iter(|| monte_carlo_var(black_box(&returns), 0.95, config, &mut rng))
                },
            );
        }
    }
    group.finish();
}

fn bench_rolling_volatility(c: &mut Criterion) {
    let series = create_series(5_040);
    let mut group = c.benchmark_group("rolling_volatility");

    for window in [20, 30, 60].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(window), window, |b, w| {
            b.iter(|| rolling_volatility(black_box(&series), *w))
        });
    }
    group.finish();
}

// =============================================================================
// CRITERION GROUPS
// =============================================================================

criterion_group!(closed_form, bench_closed_form);
criterion_group!(monte_carlo, bench_monte_carlo);
criterion_group!(volatility, bench_rolling_volatility);

criterion_main!(closed_form, monte_carlo, volatility);
