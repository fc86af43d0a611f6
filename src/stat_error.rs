/// Error type for the statistic system
#[derive(Debug, Clone, PartialEq)]
pub enum StatError {
    /// No statistic is registered under this name
    StatNotFound { name: String },

    /// No statistic (or catalog entry) exists for this statistic type
    StatTypeNotFound { name: String },

    /// The same statistic name was seeded or registered twice
    DuplicateStatName { name: String },

    /// The same statistic type was seeded twice
    DuplicateStatType { name: String },

    /// `initialize` was called on a registry that already holds statistics
    AlreadyInitialized,

    /// Configured minimum is greater than the configured maximum
    InvalidBounds { name: String, min: f32, max: f32 },
}

impl std::fmt::Display for StatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatError::StatNotFound { name } => {
                write!(f, "Statistic '{}' not found", name)
            }
            StatError::StatTypeNotFound { name } => {
                write!(f, "Statistic type '{}' not found", name)
            }
            StatError::DuplicateStatName { name } => {
                write!(f, "Statistic name '{}' is already registered", name)
            }
            StatError::DuplicateStatType { name } => {
                write!(f, "Statistic type '{}' is already registered", name)
            }
            StatError::AlreadyInitialized => {
                write!(f, "Statistic registry is already initialized")
            }
            StatError::InvalidBounds { name, min, max } => {
                write!(f, "Invalid bounds for '{}': min {} is greater than max {}", name, min, max)
            }
        }
    }
}

impl std::error::Error for StatError {}

// Type alias for Result with StatError
pub type StatResult<T> = Result<T, StatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_offending_key() {
        let err = StatError::StatNotFound { name: "Strength".to_string() };
        assert_eq!(err.to_string(), "Statistic 'Strength' not found");

        let err = StatError::InvalidBounds { name: "Armor".to_string(), min: 10.0, max: 5.0 };
        assert_eq!(err.to_string(), "Invalid bounds for 'Armor': min 10 is greater than max 5");
    }
}
