//! Simulator throughput benchmarks: rounds per second for single builds and
//! builds per second for comparison batches.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use flurry::combat::{AttackProgression, DamageSimulator};
use flurry::compare::run_comparison_parallel;
use flurry::data::{BuildConfig, BuildEntry};

fn default_config() -> BuildConfig {
    BuildConfig {
        attack_bonus: 46,
        target_ac: 50,
        strength_modifier: 11,
        keen: true,
        progression: AttackProgression::FiveAprClassic,
        ..BuildConfig::default()
    }
}

fn dual_wield_config() -> BuildConfig {
    BuildConfig {
        progression: AttackProgression::FiveAprDualWield,
        ..default_config()
    }
}

fn bench_simulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulator");
    group.sample_size(100);

    for (name, rounds) in [("rounds_1k", 1_000u32), ("rounds_100k", 100_000u32)] {
        group.throughput(Throughput::Elements(u64::from(rounds)));
        group.bench_with_input(name, &rounds, |b, &rounds| {
            b.iter_batched(
                || DamageSimulator::new("scythe", &default_config(), 7).expect("builtin weapon"),
                |mut simulator| {
                    simulator.run(rounds);
                    black_box(simulator.summary())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.throughput(Throughput::Elements(10_000));
    group.bench_function("dual_wield_rounds_10k", |b| {
        b.iter_batched(
            || DamageSimulator::new("kukri", &dual_wield_config(), 7).expect("builtin weapon"),
            |mut simulator| {
                simulator.run(10_000);
                black_box(simulator.summary())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let entries: Vec<BuildEntry> = ["longsword", "scythe", "greataxe", "kukri", "falchion"]
        .iter()
        .map(|weapon| BuildEntry {
            label: None,
            weapon: weapon.to_string(),
            config: default_config(),
        })
        .collect();

    let mut group = c.benchmark_group("comparison");
    group.sample_size(30);
    group.throughput(Throughput::Elements(entries.len() as u64));
    group.bench_function("parallel_5_builds_10k_rounds", |b| {
        b.iter(|| black_box(run_comparison_parallel(&entries, 10_000, 7).expect("known weapons")));
    });
    group.finish();
}

criterion_group!(benches, bench_simulator, bench_comparison);
criterion_main!(benches);
