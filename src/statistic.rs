use log::trace;

use crate::prelude::*;

/// Whether a statistic's cached value can be returned as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheState {
    Clean,
    #[default]
    Stale,
}

/// A single numeric gameplay value: a base, bounds, and an ordered stack of modifiers.
///
/// The final value is computed lazily. Any modifier change marks the cache stale, and the
/// next call to [`Statistic::value`] recomputes and stores the result; reads in between
/// return the cached value.
///
/// Statistics whose base is `0` with a maximum of `100` are treated as percentage scales:
/// percent modifiers set the value to `100 * percent` rather than scaling a zero base.
#[derive(Debug, Clone)]
pub struct Statistic {
    base_value: f32,
    stat_type: Option<StatisticType>,
    min_value: f32,
    max_value: f32,
    modifiers: Vec<StatModifier>,
    cached_value: f32,
    cache: CacheState,
    last_seen_base_value: f32,
    recalculations: u64,
}

impl Statistic {
    /// Creates an untyped, unbounded statistic.
    pub fn new(base_value: f32) -> Self {
        Self::build(base_value, None, f32::NEG_INFINITY, f32::INFINITY)
    }

    /// Creates a statistic from a type, using its default value and bounds.
    pub fn from_type(stat_type: &StatisticType) -> Self {
        Self::with_type(stat_type, stat_type.default_value())
    }

    /// Creates a statistic from a type with an overridden base value.
    ///
    /// # Arguments
    ///
    /// * `stat_type`: Supplies the bounds and the name of the statistic.
    /// * `base_value`: The value modifiers are applied on top of.
    pub fn with_type(stat_type: &StatisticType, base_value: f32) -> Self {
        Self::build(
            base_value,
            Some(stat_type.clone()),
            stat_type.default_min(),
            stat_type.default_max(),
        )
    }

    fn build(base_value: f32, stat_type: Option<StatisticType>, min_value: f32, max_value: f32) -> Self {
        Self {
            base_value,
            stat_type,
            min_value,
            max_value,
            modifiers: Vec::new(),
            cached_value: 0.0,
            cache: CacheState::Stale,
            last_seen_base_value: f32::MIN,
            recalculations: 0,
        }
    }

    /// Returns the clamped, modifier-applied value, recomputing only when the cache is stale.
    pub fn value(&mut self) -> f32 {
        if self.cache == CacheState::Stale || self.base_value != self.last_seen_base_value {
            self.last_seen_base_value = self.base_value;
            self.cached_value = self.calculate();
            self.cache = CacheState::Clean;
            self.recalculations += 1;
            trace!(
                "recalculated {} = {} ({} modifiers)",
                self.name().unwrap_or("<untyped>"),
                self.cached_value,
                self.modifiers.len()
            );
        }

        self.cached_value
    }

    /// Computes the final value from the base, bounds and modifiers without touching the cache.
    ///
    /// Modifiers are walked in application order. A contiguous run of `PercentAdd` modifiers
    /// is summed and applied once at the end of the run; every `PercentMult` applies on its
    /// own. The result is rounded to four decimals, then clamped.
    pub fn calculate(&self) -> f32 {
        let percent_scale = self.base_value == 0.0 && self.max_value == 100.0;
        let mut final_value = self.base_value;
        let mut percent_add_sum = 0.0;

        for (index, modifier) in self.modifiers.iter().enumerate() {
            match modifier.kind() {
                ModifierKind::Flat => {
                    final_value += modifier.value();
                }
                ModifierKind::PercentAdd => {
                    percent_add_sum += modifier.value();

                    let run_continues = self
                        .modifiers
                        .get(index + 1)
                        .is_some_and(|next| next.kind() == ModifierKind::PercentAdd);
                    if !run_continues {
                        final_value = apply_percent(final_value, percent_add_sum, percent_scale);
                        percent_add_sum = 0.0;
                    }
                }
                ModifierKind::PercentMult => {
                    final_value = apply_percent(final_value, modifier.value(), percent_scale);
                }
            }
        }

        clamp(round_to_places(final_value), self.min_value, self.max_value)
    }

    /// Adds a modifier after every modifier whose order is less than or equal to its own.
    ///
    /// Adding the same handle twice applies it twice.
    pub fn add_modifier(&mut self, modifier: StatModifier) {
        let position = self.modifiers.partition_point(|existing| existing.order() <= modifier.order());
        self.modifiers.insert(position, modifier);
        self.cache = CacheState::Stale;
    }

    /// Removes the first occurrence of `modifier`, matched by identity.
    ///
    /// Returns `false` and leaves the cache untouched when the modifier isn't present.
    pub fn remove_modifier(&mut self, modifier: &StatModifier) -> bool {
        let Some(position) = self.modifiers.iter().position(|existing| existing.same_as(modifier)) else {
            return false;
        };

        self.modifiers.remove(position);
        self.cache = CacheState::Stale;
        true
    }

    /// Removes every modifier attributed to `source` and returns them.
    ///
    /// An empty result means nothing was removed. The returned modifiers are in reverse
    /// application order.
    pub fn remove_all_from_source(&mut self, source: ModifierSource) -> Vec<StatModifier> {
        let mut removed = Vec::new();

        for index in (0..self.modifiers.len()).rev() {
            if self.modifiers[index].is_from(source) {
                removed.push(self.modifiers.remove(index));
            }
        }

        if !removed.is_empty() {
            self.cache = CacheState::Stale;
        }
        removed
    }

    /// The modifiers currently applied, in application order.
    pub fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    pub fn base_value(&self) -> f32 {
        self.base_value
    }

    pub fn stat_type(&self) -> Option<&StatisticType> {
        self.stat_type.as_ref()
    }

    /// The type's name, or `None` for untyped statistics.
    pub fn name(&self) -> Option<&str> {
        self.stat_type.as_ref().map(|stat_type| stat_type.name())
    }

    pub fn min_value(&self) -> f32 {
        self.min_value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache
    }

    pub fn is_stale(&self) -> bool {
        self.cache == CacheState::Stale
    }

    /// How many times the cached value has been refreshed.
    pub fn recalculations(&self) -> u64 {
        self.recalculations
    }
}

fn apply_percent(value: f32, percent: f32, percent_scale: bool) -> f32 {
    if percent_scale {
        100.0 * percent
    } else {
        value * (1.0 + percent)
    }
}

// Four places, ties to even, so float noise never leaks into comparisons.
fn round_to_places(value: f32) -> f32 {
    ((value as f64 * 10_000.0).round_ties_even() / 10_000.0) as f32
}

fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
