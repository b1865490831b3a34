mod ledger_file;

pub use ledger_file::*;

/// Ledger file used when no other path is configured.
pub const DEFAULT_LEDGER_FILE: &str = "transactions.csv";
