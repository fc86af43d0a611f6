use bevy::prelude::*;
use log::{debug, error};

use crate::prelude::{BaseStats, BaseStatsConfig, StatResult, StatisticRegistry, StatisticTypeCatalog};

/// A component used to build an entity's [`StatisticRegistry`] from a seed list when this
/// component is added to the entity.
///
/// Upon being added, an observer (`initialize_statistics`) seeds a new registry from
/// `base_stats`, inserts it on the entity, and removes the `StatisticsInitializer` so the
/// seeding happens exactly once. Requires [`plugin`](crate::plugin) to be added to the app.
///
/// # Example
///
/// ```
/// # use bevy::prelude::*;
/// # use bevy_tally::prelude::*;
/// # fn system(mut commands: Commands) {
/// let strength = StatisticType::new("Strength", 10.0);
/// commands.spawn(StatisticsInitializer::new(BaseStats::new().with(&strength, 14.0)));
/// # }
/// ```
#[derive(Component, Debug, Clone)]
pub struct StatisticsInitializer {
    /// The statistics, and their base values, the registry is seeded with.
    pub base_stats: BaseStats,
}

impl StatisticsInitializer {
    pub fn new(base_stats: BaseStats) -> Self {
        Self { base_stats }
    }

    /// Resolves a configuration record against the type catalog.
    pub fn from_config(config: &BaseStatsConfig, catalog: &StatisticTypeCatalog) -> StatResult<Self> {
        Ok(Self::new(config.resolve(catalog)?))
    }
}

/// An observer that builds a `StatisticRegistry` from a `StatisticsInitializer` when the
/// initializer is added, then removes the initializer.
///
/// A seed that fails to initialize is logged and dropped; no registry is inserted.
pub(crate) fn initialize_statistics(
    trigger: Trigger<OnAdd, StatisticsInitializer>,
    query_initializer: Query<&StatisticsInitializer>,
    mut commands: Commands,
) {
    let entity = trigger.target();
    let Ok(initializer) = query_initializer.get(entity) else {
        return;
    };

    let mut registry = StatisticRegistry::new();
    match registry.initialize(&initializer.base_stats) {
        Ok(()) => {
            debug!("seeded {} statistics on {}", registry.len(), entity);
            commands.entity(entity).insert(registry);
        }
        Err(err) => {
            error!("Failed to initialize statistics for {}: {}", entity, err);
        }
    }

    commands.entity(entity).remove::<StatisticsInitializer>();
}

/// Plugin function for the statistics module.
///
/// Registers the `StatisticsInitializer` observer and an empty [`StatisticTypeCatalog`]
/// resource for configured statistic types.
pub fn plugin(app: &mut App) {
    app.init_resource::<StatisticTypeCatalog>()
        .add_observer(initialize_statistics);
}
