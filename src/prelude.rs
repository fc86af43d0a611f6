pub use crate::base_stats::{BaseStatConfig, BaseStats, BaseStatsConfig, StatisticTypeCatalog, StatisticTypeConfig};
pub use crate::initializer::StatisticsInitializer;
pub use crate::modifier::{ModifierKind, ModifierSource, StatModifier};
pub use crate::registry::{ModifierOperation, ObserverId, StatisticKey, StatisticRegistry};
pub use crate::stat_error::{StatError, StatResult};
pub use crate::statistic::{CacheState, Statistic};
pub use crate::statistic_type::StatisticType;
