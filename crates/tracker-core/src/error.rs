use thiserror::Error;
use tracker_domain::EntryId;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Window size must not be negative, got {0}")]
    InvalidWindow(i64),
    #[error("Window size must be at most {max} months, got {got}")]
    WindowTooLarge { got: i64, max: usize },
    #[error("{0}")]
    Validation(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(EntryId),
    #[error("Recurring rule not found: {0}")]
    RecurringRuleNotFound(EntryId),
    #[error("Import failed: {0}")]
    Import(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
