use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Invalid transaction type (expected income or expense): {0}")]
    InvalidKind(String),

    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// True for failures that come from reading or writing the ledger file,
    /// as opposed to rejected user input.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::Csv(_) | AppError::MalformedRecord { .. }
        )
    }
}
