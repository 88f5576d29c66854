//! Dispatch Performance Benchmarks
//!
//! These benchmarks measure the cost of the dispatch pipeline:
//! - Raw dispatch through the store (validate, reduce, notify)
//! - Listener fan-out
//! - Middleware chain depth
//! - Combined reducers and dynamic JSON actions
//!
//! Run with: `cargo bench`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::cell::Cell;
use std::rc::Rc;
use unistore_core::{Action, BoxedReducer, CombinedState, combine_reducers};
use unistore_runtime::{Dispatch, Middleware, MiddlewareApi, Store, apply_middleware, create_store, from_fn};

#[derive(Clone, Debug, Default)]
struct BenchState {
    counter: i64,
    data: Vec<u8>, // For testing state size impact
}

#[derive(Clone, Debug)]
enum BenchAction {
    Increment,
    Reset,
    NoOp,
}

impl Action for BenchAction {}

fn bench_reducer(state: &BenchState, action: &BenchAction) -> BenchState {
    match action {
        BenchAction::Increment => BenchState {
            counter: state.counter + 1,
            data: state.data.clone(),
        },
        BenchAction::Reset => BenchState {
            counter: 0,
            data: state.data.clone(),
        },
        BenchAction::NoOp => state.clone(),
    }
}

fn passthrough() -> Box<dyn Middleware<BenchState, BenchAction>> {
    Box::new(from_fn(
        |_api: &MiddlewareApi<BenchState, BenchAction>, next: &Dispatch<BenchAction>, action: BenchAction| next(action),
    ))
}

/// Benchmark the raw dispatch pipeline
fn benchmark_raw_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_dispatch");
    group.throughput(Throughput::Elements(1));

    group.bench_function("increment_small_state", |b| {
        let store = Store::new(bench_reducer, BenchState::default());
        b.iter(|| store.dispatch(black_box(BenchAction::Increment)));
    });

    group.bench_function("increment_1kb_state", |b| {
        let store = Store::new(
            bench_reducer,
            BenchState {
                counter: 0,
                data: vec![0; 1024],
            },
        );
        b.iter(|| store.dispatch(black_box(BenchAction::Increment)));
    });

    group.bench_function("get_state", |b| {
        let store = Store::new(bench_reducer, BenchState::default());
        b.iter(|| black_box(store.get_state().counter));
    });

    group.finish();
}

/// Benchmark notification fan-out
fn benchmark_listeners(c: &mut Criterion) {
    let mut group = c.benchmark_group("listeners");

    for count in [1_usize, 8, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let store = Store::new(bench_reducer, BenchState::default());
            let calls = Rc::new(Cell::new(0_u64));
            for _ in 0..count {
                let calls = Rc::clone(&calls);
                store.subscribe(move || calls.set(calls.get() + 1));
            }
            b.iter(|| store.dispatch(black_box(BenchAction::NoOp)));
        });
    }

    group.finish();
}

/// Benchmark middleware chain depth
fn benchmark_middleware_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("middleware_depth");

    for depth in [0_usize, 1, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            let chain = (0..depth).map(|_| passthrough()).collect();
            let store = create_store(
                bench_reducer,
                BenchState::default(),
                Some(Box::new(apply_middleware(chain))),
            )
            .expect("store construction");
            b.iter(|| store.dispatch(black_box(BenchAction::Reset)));
        });
    }

    group.finish();
}

/// Benchmark combined reducers driven by JSON actions
fn benchmark_combined_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("combined_json");
    group.throughput(Throughput::Elements(1));

    let slice = |count: &i64, action: &Value| match action["type"].as_str() {
        Some("INC") => count + 1,
        _ => *count,
    };
    let reducers: Vec<(String, BoxedReducer<i64, Value>)> = (0..8)
        .map(|i| {
            let reducer: BoxedReducer<i64, Value> = Box::new(slice);
            (format!("slice{i}"), reducer)
        })
        .collect();
    let root = combine_reducers(reducers).expect("unique keys");
    let store = Store::new(root, CombinedState::new());
    let action = json!({ "type": "INC", "payload": { "by": 1 } });

    group.bench_function("eight_slices", |b| {
        b.iter(|| store.dispatch(black_box(action.clone())));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_raw_dispatch,
    benchmark_listeners,
    benchmark_middleware_depth,
    benchmark_combined_json,
);
criterion_main!(benches);
