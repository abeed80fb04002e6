use criterion::{black_box, criterion_group, criterion_main, Criterion};
use landed_cost::core::parameters::{Field, ParameterUpdate, Parameters};
use landed_cost::engine::pipeline::CostEngine;
use landed_cost::simulation::fx_shock::FxShock;
use landed_cost::simulation::random_params::{generate_batch, ParameterRanges};
use landed_cost::state::session::Session;
use rust_decimal::Decimal;

fn bench_compute_defaults(c: &mut Criterion) {
    let params = Parameters::default();

    c.bench_function("compute_defaults", |b| {
        b.iter(|| CostEngine::compute(black_box(&params)))
    });
}

fn bench_compute_random_batch(c: &mut Criterion) {
    let batch = generate_batch(&ParameterRanges::default(), 1000);

    c.bench_function("compute_random_1000", |b| {
        b.iter(|| {
            for params in &batch {
                black_box(CostEngine::compute(params));
            }
        })
    });
}

fn bench_session_edits(c: &mut Criterion) {
    c.bench_function("session_100_edits", |b| {
        b.iter(|| {
            let mut session = Session::default();
            for i in 0..100 {
                session.apply_update(
                    ParameterUpdate::new().set(Field::UsdNeeded, Decimal::from(i + 1)),
                );
            }
            black_box(session.customs_tax())
        })
    });
}

fn bench_rate_sweep(c: &mut Criterion) {
    let params = Parameters::default();
    let shocks: Vec<Decimal> = (-20..=20).map(Decimal::from).collect();

    c.bench_function("rate_sweep_41", |b| {
        b.iter(|| FxShock::rate_sweep(black_box(&params), black_box(&shocks)))
    });
}

criterion_group!(
    benches,
    bench_compute_defaults,
    bench_compute_random_batch,
    bench_session_edits,
    bench_rate_sweep
);
criterion_main!(benches);
