use bevy::{platform::collections::HashMap, prelude::Component};
use log::debug;

use crate::prelude::*;

/// Addresses a statistic in a [`StatisticRegistry`], either by name or by type.
///
/// Registry methods take `impl Into<StatisticKey>`, so a `&str` or a `&StatisticType`
/// can be passed directly.
#[derive(Debug, Clone, Copy)]
pub enum StatisticKey<'a> {
    Name(&'a str),
    Type(&'a StatisticType),
}

impl<'a> From<&'a str> for StatisticKey<'a> {
    fn from(name: &'a str) -> Self {
        StatisticKey::Name(name)
    }
}

impl<'a> From<&'a String> for StatisticKey<'a> {
    fn from(name: &'a String) -> Self {
        StatisticKey::Name(name.as_str())
    }
}

impl<'a> From<&'a StatisticType> for StatisticKey<'a> {
    fn from(stat_type: &'a StatisticType) -> Self {
        StatisticKey::Type(stat_type)
    }
}

/// What happened to a modifier, as reported to registry observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierOperation {
    Added,
    Removed,
    RemovedAllFromSource,
}

/// Handle returned by [`StatisticRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type ModifierObserver = Box<dyn FnMut(&Statistic, &StatModifier, ModifierOperation) + Send + Sync>;

/// Owns an entity's statistics and mediates every modifier change made to them.
///
/// A registry is seeded once with [`StatisticRegistry::initialize`]; after that the set of
/// statistics is fixed and only their modifiers change, until [`StatisticRegistry::teardown`]
/// empties it again. Statistics can be addressed by name or by [`StatisticType`].
///
/// Every modifier change is reported synchronously, in order, to the observers registered
/// with [`StatisticRegistry::subscribe`]. Observers only see shared references and so
/// cannot mutate the statistic they are being told about.
///
/// # Example
///
/// ```
/// # use bevy_tally::prelude::*;
/// let attack = StatisticType::new("Attack", 10.0).with_bounds(0.0, 999.0);
/// let mut registry = StatisticRegistry::new();
/// registry.initialize(&BaseStats::new().with(&attack, 10.0)).unwrap();
///
/// registry.apply_modifier("Attack", StatModifier::flat(5.0).with_order(0)).unwrap();
/// registry.apply_modifier(&attack, StatModifier::percent_add(0.5).with_order(1)).unwrap();
/// assert_eq!(registry.value("Attack").unwrap(), 22.5);
/// ```
#[derive(Component, Default)]
pub struct StatisticRegistry {
    statistics: Vec<Statistic>,
    stat_from_name: HashMap<String, usize>,
    stat_from_type: HashMap<StatisticType, usize>,
    type_from_name: HashMap<String, StatisticType>,
    observers: Vec<(ObserverId, ModifierObserver)>,
    next_observer_id: u64,
}

impl StatisticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds one statistic per seed entry and indexes it by name and by type.
    ///
    /// The seed is validated before anything is inserted, so on error the registry is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// * `AlreadyInitialized` if the registry already holds statistics.
    /// * `DuplicateStatType` if a type appears twice in the seed.
    /// * `DuplicateStatName` if two distinct types share a name.
    pub fn initialize(&mut self, seed: &BaseStats) -> StatResult<()> {
        if !self.statistics.is_empty() {
            return Err(StatError::AlreadyInitialized);
        }

        let mut stat_from_name: HashMap<String, usize> = HashMap::default();
        let mut stat_from_type: HashMap<StatisticType, usize> = HashMap::default();
        let mut type_from_name: HashMap<String, StatisticType> = HashMap::default();
        let mut statistics = Vec::with_capacity(seed.len());

        for (stat_type, base_value) in seed.iter() {
            let name = stat_type.name();
            if stat_from_type.contains_key(stat_type) {
                return Err(StatError::DuplicateStatType { name: name.to_string() });
            }
            if stat_from_name.contains_key(name) {
                return Err(StatError::DuplicateStatName { name: name.to_string() });
            }

            let index = statistics.len();
            statistics.push(Statistic::with_type(stat_type, *base_value));
            stat_from_name.insert(name.to_string(), index);
            stat_from_type.insert(stat_type.clone(), index);
            type_from_name.insert(name.to_string(), stat_type.clone());
        }

        self.statistics = statistics;
        self.stat_from_name = stat_from_name;
        self.stat_from_type = stat_from_type;
        self.type_from_name = type_from_name;

        debug!("initialized statistic registry with {} statistics", self.statistics.len());
        Ok(())
    }

    /// Drops every statistic and observer. The registry can be initialized again afterwards.
    pub fn teardown(&mut self) {
        debug!("tearing down statistic registry ({} statistics)", self.statistics.len());
        self.statistics.clear();
        self.stat_from_name.clear();
        self.stat_from_type.clear();
        self.type_from_name.clear();
        self.observers.clear();
    }

    /// Registers an observer for modifier changes and returns a handle to remove it.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&Statistic, &StatModifier, ModifierOperation) + Send + Sync + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Adds `modifier` to the addressed statistic and notifies observers with `Added`.
    pub fn apply_modifier<'a>(&mut self, key: impl Into<StatisticKey<'a>>, modifier: StatModifier) -> StatResult<()> {
        let index = self.index_of(key.into())?;
        let statistic = &mut self.statistics[index];
        statistic.add_modifier(modifier.clone());
        debug!("added {:?} modifier {} to {}", modifier.kind(), modifier.value(), display_name(statistic));

        notify(&mut self.observers, &self.statistics[index], &modifier, ModifierOperation::Added);
        Ok(())
    }

    /// Removes `modifier` from the addressed statistic.
    ///
    /// Observers hear `Removed` only when the modifier was actually present; removing an
    /// absent modifier returns `Ok(false)`.
    pub fn remove_modifier<'a>(&mut self, key: impl Into<StatisticKey<'a>>, modifier: &StatModifier) -> StatResult<bool> {
        let index = self.index_of(key.into())?;
        if !self.statistics[index].remove_modifier(modifier) {
            return Ok(false);
        }

        debug!("removed {:?} modifier {} from {}", modifier.kind(), modifier.value(), display_name(&self.statistics[index]));
        notify(&mut self.observers, &self.statistics[index], modifier, ModifierOperation::Removed);
        Ok(true)
    }

    /// Removes everything `source` added to any statistic, returning how many modifiers went.
    ///
    /// Statistics are visited in seed order, and observers hear one `RemovedAllFromSource`
    /// per removed modifier.
    pub fn remove_all_modifiers_from_source(&mut self, source: impl Into<ModifierSource>) -> usize {
        let source = source.into();
        (0..self.statistics.len())
            .map(|index| self.remove_all_from_source_at(index, source))
            .sum()
    }

    /// Removes everything `source` added to the addressed statistic.
    pub fn remove_all_modifiers_from_source_on<'a>(
        &mut self,
        key: impl Into<StatisticKey<'a>>,
        source: impl Into<ModifierSource>,
    ) -> StatResult<usize> {
        let index = self.index_of(key.into())?;
        Ok(self.remove_all_from_source_at(index, source.into()))
    }

    fn remove_all_from_source_at(&mut self, index: usize, source: ModifierSource) -> usize {
        let removed = self.statistics[index].remove_all_from_source(source);
        if removed.is_empty() {
            return 0;
        }

        debug!("removed {} modifiers from {:?} on {}", removed.len(), source, display_name(&self.statistics[index]));
        for modifier in &removed {
            notify(&mut self.observers, &self.statistics[index], modifier, ModifierOperation::RemovedAllFromSource);
        }
        removed.len()
    }

    /// True when every key names a registered statistic.
    pub fn has_statistics<'a, K: Into<StatisticKey<'a>>>(&self, keys: impl IntoIterator<Item = K>) -> bool {
        keys.into_iter().all(|key| self.index_of(key.into()).is_ok())
    }

    pub fn statistic<'a>(&self, key: impl Into<StatisticKey<'a>>) -> StatResult<&Statistic> {
        let index = self.index_of(key.into())?;
        Ok(&self.statistics[index])
    }

    /// Reads the current value of the addressed statistic, refreshing its cache if stale.
    pub fn value<'a>(&mut self, key: impl Into<StatisticKey<'a>>) -> StatResult<f32> {
        let index = self.index_of(key.into())?;
        Ok(self.statistics[index].value())
    }

    pub fn stat_type_from_name(&self, name: &str) -> StatResult<&StatisticType> {
        self.type_from_name
            .get(name)
            .ok_or_else(|| StatError::StatNotFound { name: name.to_string() })
    }

    /// Iterates statistics in seed order.
    pub fn iter(&self) -> impl Iterator<Item = &Statistic> {
        self.statistics.iter()
    }

    pub fn len(&self) -> usize {
        self.statistics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statistics.is_empty()
    }

    fn index_of(&self, key: StatisticKey) -> StatResult<usize> {
        match key {
            StatisticKey::Name(name) => self
                .stat_from_name
                .get(name)
                .copied()
                .ok_or_else(|| StatError::StatNotFound { name: name.to_string() }),
            StatisticKey::Type(stat_type) => self
                .stat_from_type
                .get(stat_type)
                .copied()
                .ok_or_else(|| StatError::StatTypeNotFound { name: stat_type.name().to_string() }),
        }
    }
}

impl std::fmt::Debug for StatisticRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticRegistry")
            .field("statistics", &self.statistics)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn notify(
    observers: &mut [(ObserverId, ModifierObserver)],
    statistic: &Statistic,
    modifier: &StatModifier,
    operation: ModifierOperation,
) {
    for (_, observer) in observers.iter_mut() {
        observer(statistic, modifier, operation);
    }
}

fn display_name(statistic: &Statistic) -> &str {
    statistic.name().unwrap_or("<untyped>")
}
