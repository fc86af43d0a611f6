use bevy::{platform::collections::HashMap, prelude::Resource};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// An ordered list of `(StatisticType, base value)` pairs used to seed a [`StatisticRegistry`].
///
/// ```
/// # use bevy_tally::prelude::*;
/// let strength = StatisticType::new("Strength", 10.0);
/// let agility = StatisticType::new("Agility", 8.0);
///
/// let seed = BaseStats::new()
///     .with(&strength, 14.0)
///     .with_default(&agility);
/// assert_eq!(seed.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaseStats(Vec<(StatisticType, f32)>);

impl BaseStats {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, stat_type: &StatisticType, base_value: f32) {
        self.0.push((stat_type.clone(), base_value));
    }

    /// Builder form of [`BaseStats::push`].
    pub fn with(mut self, stat_type: &StatisticType, base_value: f32) -> Self {
        self.push(stat_type, base_value);
        self
    }

    /// Adds `stat_type` seeded with its own default value.
    pub fn with_default(self, stat_type: &StatisticType) -> Self {
        let base_value = stat_type.default_value();
        self.with(stat_type, base_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(StatisticType, f32)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StatisticType, f32)> for BaseStats {
    fn from_iter<I: IntoIterator<Item = (StatisticType, f32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Configuration record describing a statistic type, as it would be authored in a data file.
///
/// Missing bounds mean unbounded on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticTypeConfig {
    pub name: String,
    #[serde(default)]
    pub default_value: f32,
    #[serde(default)]
    pub default_min: Option<f32>,
    #[serde(default)]
    pub default_max: Option<f32>,
}

impl StatisticTypeConfig {
    /// Builds a fresh [`StatisticType`] identity from this record.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` when both bounds are set and `min > max`.
    pub fn build(&self) -> StatResult<StatisticType> {
        let min = self.default_min.unwrap_or(f32::NEG_INFINITY);
        let max = self.default_max.unwrap_or(f32::INFINITY);
        if min > max {
            return Err(StatError::InvalidBounds { name: self.name.clone(), min, max });
        }

        Ok(StatisticType::new(self.name.clone(), self.default_value).with_bounds(min, max))
    }
}

/// Configuration record for one seeded statistic. `value` falls back to the type's default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStatConfig {
    pub stat_type: String,
    #[serde(default)]
    pub value: Option<f32>,
}

/// Configuration record for a whole seed list, referring to statistic types by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStatsConfig {
    pub stats: Vec<BaseStatConfig>,
}

impl BaseStatsConfig {
    /// Resolves type names against `catalog`, preserving entry order.
    pub fn resolve(&self, catalog: &StatisticTypeCatalog) -> StatResult<BaseStats> {
        self.stats
            .iter()
            .map(|entry| {
                let stat_type = catalog.get(&entry.stat_type)?;
                let base_value = entry.value.unwrap_or(stat_type.default_value());
                Ok((stat_type, base_value))
            })
            .collect()
    }
}

/// Resource holding the configured statistic types, addressable by name.
///
/// The catalog hands out the canonical [`StatisticType`] handle for each name, so every
/// registry seeded through it shares the same type identities.
#[derive(Resource, Debug, Clone, Default)]
pub struct StatisticTypeCatalog {
    types: HashMap<String, StatisticType>,
}

impl StatisticTypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of type records.
    pub fn from_configs<'a>(configs: impl IntoIterator<Item = &'a StatisticTypeConfig>) -> StatResult<Self> {
        let mut catalog = Self::new();
        for config in configs {
            catalog.register(config)?;
        }
        Ok(catalog)
    }

    /// Registers a type record and returns its canonical handle.
    ///
    /// # Errors
    ///
    /// * `DuplicateStatName` if the name is already registered.
    /// * `InvalidBounds` if the record's bounds are inverted.
    pub fn register(&mut self, config: &StatisticTypeConfig) -> StatResult<StatisticType> {
        if self.types.contains_key(&config.name) {
            return Err(StatError::DuplicateStatName { name: config.name.clone() });
        }

        let stat_type = config.build()?;
        self.types.insert(config.name.clone(), stat_type.clone());
        Ok(stat_type)
    }

    pub fn get(&self, name: &str) -> StatResult<StatisticType> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| StatError::StatTypeNotFound { name: name.to_string() })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
