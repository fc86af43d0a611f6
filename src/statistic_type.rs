use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug)]
struct StatisticTypeDef {
    name: String,
    default_value: f32,
    default_min: f32,
    default_max: f32,
}

/// Identifies a kind of statistic, such as "Strength" or "MaxHealth", and carries its
/// configured defaults.
///
/// A `StatisticType` is a shared handle. Equality and hashing go by identity: clones of
/// one handle compare equal, while two types built separately compare unequal even when
/// their names and defaults match. This lets it act as a registry key the same way a
/// configuration asset reference would.
///
/// Bounds default to `(-inf, +inf)` unless set with [`StatisticType::with_bounds`].
#[derive(Debug, Clone)]
pub struct StatisticType(Arc<StatisticTypeDef>);

impl StatisticType {
    /// Creates a new, unbounded statistic type.
    ///
    /// # Arguments
    ///
    /// * `name`: The display and lookup name of the statistic (e.g., "Attack").
    /// * `default_value`: The base value used when no override is seeded.
    pub fn new(name: impl Into<String>, default_value: f32) -> Self {
        Self(Arc::new(StatisticTypeDef {
            name: name.into(),
            default_value,
            default_min: f32::NEG_INFINITY,
            default_max: f32::INFINITY,
        }))
    }

    /// Returns a new type with the given bounds, consuming this handle.
    ///
    /// The returned handle is a fresh identity; it is not equal to the one it was built from.
    pub fn with_bounds(self, min: f32, max: f32) -> Self {
        Self(Arc::new(StatisticTypeDef {
            name: self.0.name.clone(),
            default_value: self.0.default_value,
            default_min: min,
            default_max: max,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn default_value(&self) -> f32 {
        self.0.default_value
    }

    pub fn default_min(&self) -> f32 {
        self.0.default_min
    }

    pub fn default_max(&self) -> f32 {
        self.0.default_max
    }
}

impl PartialEq for StatisticType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for StatisticType {}

impl Hash for StatisticType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl std::fmt::Display for StatisticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::platform::collections::HashSet;

    #[test]
    fn test_identity_equality() {
        let strength = StatisticType::new("Strength", 10.0);
        let same_handle = strength.clone();
        let lookalike = StatisticType::new("Strength", 10.0);

        assert_eq!(strength, same_handle);
        assert_ne!(strength, lookalike);

        let mut keys: HashSet<StatisticType> = HashSet::default();
        keys.insert(strength.clone());
        assert!(keys.contains(&same_handle));
        assert!(!keys.contains(&lookalike));
    }

    #[test]
    fn test_default_bounds_are_unbounded() {
        let speed = StatisticType::new("Speed", 5.0);
        assert_eq!(speed.default_min(), f32::NEG_INFINITY);
        assert_eq!(speed.default_max(), f32::INFINITY);

        let bounded = speed.with_bounds(0.0, 20.0);
        assert_eq!(bounded.name(), "Speed");
        assert_eq!(bounded.default_value(), 5.0);
        assert_eq!(bounded.default_min(), 0.0);
        assert_eq!(bounded.default_max(), 20.0);
    }
}
