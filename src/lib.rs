pub mod base_stats;
pub mod initializer;
pub mod modifier;
pub mod prelude;
pub mod registry;
pub mod stat_error;
pub mod statistic;
pub mod statistic_type;

pub use initializer::plugin;
