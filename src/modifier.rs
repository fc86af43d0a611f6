use std::sync::Arc;

use bevy::prelude::Entity;
use serde::{Deserialize, Serialize};

/// How a modifier stacks onto a statistic.
///
/// The discriminant doubles as the default application order, so without explicit orders
/// flat bonuses land first, then additive percentages, then multiplicative ones.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Added straight onto the running value.
    Flat = 100,
    /// Summed with neighbouring `PercentAdd` modifiers, then multiplied in once.
    PercentAdd = 200,
    /// Multiplied in on its own.
    PercentMult = 300,
}

impl ModifierKind {
    pub fn default_order(self) -> i32 {
        self as i32
    }
}

/// Opaque token naming whoever added a modifier (an item, a buff, a skill).
///
/// Sources are only ever compared, never dereferenced. Any stable `u64` works; entities
/// convert through their bit representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModifierSource(pub u64);

impl From<Entity> for ModifierSource {
    fn from(entity: Entity) -> Self {
        Self(entity.to_bits())
    }
}

impl From<u64> for ModifierSource {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug)]
struct ModifierData {
    value: f32,
    kind: ModifierKind,
    order: i32,
    source: Option<ModifierSource>,
}

/// A single adjustment to a statistic.
///
/// `StatModifier` is an immutable shared handle. Removal matches by identity: a clone of
/// a modifier removes it, while a separately built modifier with identical fields does not.
///
/// ```
/// # use bevy_tally::prelude::*;
/// let sword = ModifierSource(7);
/// let bonus = StatModifier::new(0.1, ModifierKind::PercentMult)
///     .with_order(2)
///     .with_source(sword);
/// assert_eq!(bonus.order(), 2);
/// assert_eq!(bonus.source(), Some(sword));
/// ```
#[derive(Debug, Clone)]
pub struct StatModifier(Arc<ModifierData>);

impl StatModifier {
    /// Creates a modifier with the kind's default order and no source.
    pub fn new(value: f32, kind: ModifierKind) -> Self {
        Self(Arc::new(ModifierData {
            value,
            kind,
            order: kind.default_order(),
            source: None,
        }))
    }

    /// Shorthand for `StatModifier::new(value, ModifierKind::Flat)`.
    pub fn flat(value: f32) -> Self {
        Self::new(value, ModifierKind::Flat)
    }

    /// Shorthand for `StatModifier::new(value, ModifierKind::PercentAdd)`.
    pub fn percent_add(value: f32) -> Self {
        Self::new(value, ModifierKind::PercentAdd)
    }

    /// Shorthand for `StatModifier::new(value, ModifierKind::PercentMult)`.
    pub fn percent_mult(value: f32) -> Self {
        Self::new(value, ModifierKind::PercentMult)
    }

    /// Returns a new modifier with the given application order.
    pub fn with_order(self, order: i32) -> Self {
        self.rebuild(|data| data.order = order)
    }

    /// Returns a new modifier attributed to `source`.
    pub fn with_source(self, source: impl Into<ModifierSource>) -> Self {
        let source = source.into();
        self.rebuild(|data| data.source = Some(source))
    }

    fn rebuild(self, edit: impl FnOnce(&mut ModifierData)) -> Self {
        let mut data = ModifierData {
            value: self.0.value,
            kind: self.0.kind,
            order: self.0.order,
            source: self.0.source,
        };
        edit(&mut data);
        Self(Arc::new(data))
    }

    pub fn value(&self) -> f32 {
        self.0.value
    }

    pub fn kind(&self) -> ModifierKind {
        self.0.kind
    }

    pub fn order(&self) -> i32 {
        self.0.order
    }

    pub fn source(&self) -> Option<ModifierSource> {
        self.0.source
    }

    /// True when `self` and `other` are handles to the same modifier.
    pub fn same_as(&self, other: &StatModifier) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_from(&self, source: ModifierSource) -> bool {
        self.0.source == Some(source)
    }
}

impl PartialEq for StatModifier {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for StatModifier {}
