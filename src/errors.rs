use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

use crate::config::ConfigError;

/// Error type that captures expense ledger failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{message}")]
    CorruptionDetected {
        message: String,
        backup: Option<PathBuf>,
    },
    #[error("Persistence error: {0}")]
    Storage(String),
}

impl ExpenseError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ExpenseError::InvalidInput(message.into())
    }

    /// Path of the quarantined file tied to a corruption failure, if any.
    pub fn backup_path(&self) -> Option<&PathBuf> {
        match self {
            ExpenseError::CorruptionDetected { backup, .. } => backup.as_ref(),
            _ => None,
        }
    }

    pub fn is_corruption(&self) -> bool {
        matches!(self, ExpenseError::CorruptionDetected { .. })
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        ExpenseError::Storage(err.to_string())
    }
}

pub type Result<T> = StdResult<T, ExpenseError>;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Process exit code the binary reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(err) if err.is_corruption() => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corruption_maps_to_distinct_exit_code() {
        let err = CliError::from(ExpenseError::CorruptionDetected {
            message: "bad".into(),
            backup: Some(PathBuf::from("expenses.json.20240101_000000.corrupt")),
        });
        assert_eq!(err.exit_code(), 2);
        assert_eq!(CliError::from(ExpenseError::invalid("nope")).exit_code(), 1);
        let config = ConfigError::Malformed {
            path: PathBuf::from("config.json"),
            reason: "broken".into(),
        };
        assert_eq!(CliError::from(config).exit_code(), 1);
    }

    #[test]
    fn io_errors_become_storage_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ExpenseError::from(io);
        assert!(matches!(err, ExpenseError::Storage(ref msg) if msg.contains("denied")));
        assert!(err.backup_path().is_none());
    }
}
