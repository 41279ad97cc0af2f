//! Performance benchmarks for the time card rule engine.
//!
//! Covers day evaluation as the number of clock lines grows, plus one full
//! apply-rules round trip through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use timecard_rules::api::{AppState, create_router};
use timecard_rules::calculation::evaluate_day;
use timecard_rules::config::ConfigLoader;
use timecard_rules::models::{ClockInterval, ContractRules, TimeCard};
use timecard_rules::service::apply_rules;
use timecard_rules::store::InMemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn bench_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 19).expect("valid date")
}

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn bench_contract() -> ContractRules {
    load_config()
        .get_contract("CTR_UNWORKED")
        .expect("contract present")
        .clone()
}

/// Half-hour clock lines starting on the hour, so every gap is a meal.
fn clock_lines(count: usize) -> Vec<ClockInterval> {
    let midnight = bench_date().and_time(NaiveTime::MIN);
    (0..count)
        .map(|i| {
            let time_in = midnight + TimeDelta::hours(i as i64);
            ClockInterval {
                source_line_id: format!("TCL_{}", i + 1),
                time_in,
                time_out: time_in + TimeDelta::minutes(30),
            }
        })
        .collect()
}

fn clock_lines_json(count: usize) -> serde_json::Value {
    let clocks: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "line_id": format!("TCL_{}", i + 1),
                "time_in": format!("{:02}:00:00", i),
                "time_out": format!("{:02}:30:00", i),
            })
        })
        .collect();

    serde_json::json!({
        "contract_id": "CTR_UNWORKED",
        "worker_id": "WRK_BENCH",
        "date": "2026-05-19",
        "clocks": clocks
    })
}

/// Benchmark: day evaluation over a growing number of clock lines.
fn bench_evaluate_day_scaling(c: &mut Criterion) {
    let rules = bench_contract();
    let mut group = c.benchmark_group("evaluate_day");

    for count in [1usize, 4, 8, 16, 24] {
        let intervals = clock_lines(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("clock_lines", count), &intervals, |b, intervals| {
            b.iter(|| black_box(evaluate_day(bench_date(), intervals, &rules)))
        });
    }

    group.finish();
}

/// Benchmark: apply rules against the in-memory store, replacing entries each run.
fn bench_apply_rules_store(c: &mut Criterion) {
    let config = load_config();
    let store = InMemoryStore::from_config(&config);
    let card = TimeCard {
        id: "TC_BENCH".to_string(),
        contract_id: "CTR_UNWORKED".to_string(),
        worker_id: "WRK_BENCH".to_string(),
        date: bench_date(),
    };
    store
        .upsert_time_card(card, clock_lines(8))
        .expect("Failed to seed store");

    c.bench_function("apply_rules_store", |b| {
        b.iter(|| black_box(apply_rules(&store, "TC_BENCH")))
    });
}

/// Benchmark: apply-rules request through the router.
fn bench_apply_rules_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = serde_json::to_string(&clock_lines_json(8)).unwrap();

    rt.block_on(async {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/timecards/TC_BENCH")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_success());
    });

    c.bench_function("apply_rules_http", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/timecards/TC_BENCH/apply-rules")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate_day_scaling,
    bench_apply_rules_store,
    bench_apply_rules_http,
);
criterion_main!(benches);
