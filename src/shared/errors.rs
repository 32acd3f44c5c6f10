use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error(
        "Insufficient readings: period {from}..{to} contains {found} reading(s), at least 2 are required"
    )]
    InsufficientReadings {
        from: NaiveDate,
        to: NaiveDate,
        found: usize,
    },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Short machine-readable label, used as a metrics tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation",
            Self::InsufficientReadings { .. } => "insufficient_readings",
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metrics recorder error: {0}")]
    Metrics(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_readings_message_names_the_period() {
        let err = DomainError::InsufficientReadings {
            from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            found: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-01-01..2024-01-31"));
        assert!(msg.contains("1 reading(s)"));
        assert_eq!(err.kind(), "insufficient_readings");
    }

    #[test]
    fn not_found_message() {
        let err = DomainError::NotFound {
            entity: "MeterReading",
            field: "id",
            value: "r-9".into(),
        };
        assert_eq!(err.to_string(), "Not found: MeterReading with id=r-9");
    }
}
