use std::sync::{Arc, Mutex};

use bevy_tally::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn attack_registry() -> (StatisticRegistry, StatisticType) {
    let attack = StatisticType::new("Attack", 10.0).with_bounds(0.0, 999.0);
    let mut registry = StatisticRegistry::new();
    registry.initialize(&BaseStats::new().with_default(&attack)).unwrap();
    (registry, attack)
}

fn round4(value: f32) -> f32 {
    ((value as f64 * 10_000.0).round_ties_even() / 10_000.0) as f32
}

#[test]
fn test_attack_scenario() {
    let (mut registry, attack) = attack_registry();

    registry.apply_modifier("Attack", StatModifier::flat(5.0).with_order(0)).unwrap();
    registry.apply_modifier("Attack", StatModifier::percent_add(0.5).with_order(1)).unwrap();
    assert_eq!(registry.value("Attack").unwrap(), 22.5);

    registry.apply_modifier(&attack, StatModifier::percent_mult(0.1).with_order(2)).unwrap();
    assert_eq!(registry.value(&attack).unwrap(), 24.75);
}

#[test]
fn test_percent_stat_uses_absolute_scale() {
    let block = StatisticType::new("BlockChance", 0.0).with_bounds(0.0, 100.0);
    let mut registry = StatisticRegistry::new();
    registry.initialize(&BaseStats::new().with_default(&block)).unwrap();

    registry.apply_modifier(&block, StatModifier::percent_add(0.25)).unwrap();
    assert_eq!(registry.value(&block).unwrap(), 25.0);
}

#[test]
fn test_reads_without_mutation_do_not_recalculate() {
    let (mut registry, _) = attack_registry();
    registry.apply_modifier("Attack", StatModifier::flat(1.0)).unwrap();

    let first = registry.value("Attack").unwrap();
    let second = registry.value("Attack").unwrap();
    assert_eq!(first, second);
    assert_eq!(registry.statistic("Attack").unwrap().recalculations(), 1);
}

#[test]
fn test_random_flat_sequences_sum() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let base = rng.random_range(-50.0..50.0f32);
        let mut statistic = Statistic::new(base);
        let mut expected = base;

        for _ in 0..rng.random_range(0..20) {
            let value = rng.random_range(-10.0..10.0f32);
            statistic.add_modifier(StatModifier::flat(value));
            expected += value;
        }

        assert_eq!(statistic.value(), round4(expected));
    }
}

#[test]
fn test_random_add_remove_restores_values() {
    let mut rng = StdRng::seed_from_u64(42);
    let kinds = [ModifierKind::Flat, ModifierKind::PercentAdd, ModifierKind::PercentMult];

    for _ in 0..50 {
        let mut statistic = Statistic::new(rng.random_range(1.0..200.0f32));
        let mut applied = Vec::new();
        let mut history = vec![statistic.value()];

        for _ in 0..rng.random_range(1..12) {
            let kind = kinds[rng.random_range(0..kinds.len())];
            let modifier = StatModifier::new(rng.random_range(-0.5..2.0f32), kind)
                .with_order(rng.random_range(0..4));
            statistic.add_modifier(modifier.clone());
            applied.push(modifier);
            history.push(statistic.value());
        }

        // Undo in reverse; every intermediate value must come back exactly.
        history.pop();
        while let Some(modifier) = applied.pop() {
            assert!(statistic.remove_modifier(&modifier));
            assert_eq!(Some(statistic.value()), history.pop());
        }
        assert!(statistic.modifiers().is_empty());
    }
}

#[test]
fn test_source_removal_leaves_other_sources() {
    let mut rng = StdRng::seed_from_u64(3);
    let (mut registry, _) = attack_registry();
    let sources = [ModifierSource(1), ModifierSource(2), ModifierSource(3)];

    for _ in 0..30 {
        let source = sources[rng.random_range(0..sources.len())];
        let modifier = StatModifier::flat(rng.random_range(0.0..5.0f32)).with_source(source);
        registry.apply_modifier("Attack", modifier).unwrap();
    }

    let before: Vec<StatModifier> = registry.statistic("Attack").unwrap().modifiers().to_vec();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    registry.subscribe(move |_, modifier, operation| sink.lock().unwrap().push((modifier.clone(), operation)));

    let removed = registry.remove_all_modifiers_from_source(ModifierSource(2));

    let after = registry.statistic("Attack").unwrap().modifiers().to_vec();
    let expected: Vec<StatModifier> = before.iter().filter(|m| !m.is_from(ModifierSource(2))).cloned().collect();
    assert_eq!(after, expected);
    assert_eq!(removed, before.len() - after.len());

    let events = events.lock().unwrap();
    assert_eq!(events.len(), removed);
    assert!(events.iter().all(|(modifier, operation)| {
        modifier.is_from(ModifierSource(2)) && *operation == ModifierOperation::RemovedAllFromSource
    }));
}

#[test]
fn test_no_event_for_unmatched_source() {
    let (mut registry, _) = attack_registry();
    registry.apply_modifier("Attack", StatModifier::flat(1.0).with_source(ModifierSource(1))).unwrap();

    let fired = Arc::new(Mutex::new(false));
    let sink = fired.clone();
    registry.subscribe(move |_, _, _| *sink.lock().unwrap() = true);

    assert_eq!(registry.remove_all_modifiers_from_source(ModifierSource(99)), 0);
    assert!(!*fired.lock().unwrap());
}
