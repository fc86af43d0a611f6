use bevy_tally::prelude::*;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn stacked_statistic(modifier_count: usize) -> Statistic {
    let mut statistic = Statistic::new(100.0);
    for i in 0..modifier_count {
        let modifier = match i % 3 {
            0 => StatModifier::flat(1.5),
            1 => StatModifier::percent_add(0.05),
            _ => StatModifier::percent_mult(0.01),
        };
        statistic.add_modifier(modifier.with_order((i % 7) as i32).with_source(ModifierSource((i % 4) as u64)));
    }
    statistic
}

pub fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");

    for count in [4usize, 32, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let statistic = stacked_statistic(count);
            b.iter(|| black_box(statistic.calculate()));
        });
    }

    group.finish();
}

pub fn bench_cached_read(c: &mut Criterion) {
    let mut statistic = stacked_statistic(256);
    statistic.value();

    c.bench_function("cached_read", |b| b.iter(|| black_box(statistic.value())));
}

pub fn bench_registry_churn(c: &mut Criterion) {
    let types: Vec<StatisticType> = (0..16)
        .map(|i| StatisticType::new(format!("Stat{i}"), 10.0))
        .collect();
    let seed: BaseStats = types.iter().map(|stat_type| (stat_type.clone(), 10.0)).collect();

    c.bench_function("registry_apply_and_remove_source", |b| {
        let mut registry = StatisticRegistry::new();
        registry.initialize(&seed).unwrap();
        let buff = ModifierSource(1);

        b.iter(|| {
            for stat_type in &types {
                registry.apply_modifier(stat_type, StatModifier::percent_add(0.1).with_source(buff)).unwrap();
            }
            black_box(registry.value("Stat0").unwrap());
            black_box(registry.remove_all_modifiers_from_source(buff));
        });
    });
}

criterion_group!(benches, bench_calculate, bench_cached_read, bench_registry_churn);
criterion_main!(benches);
