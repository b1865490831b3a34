use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use tracing::{debug, info};

use crate::domain::{Transaction, TransactionKind, parse_cents, parse_date};
use crate::storage;

use super::{AppError, MonthlySummary, summarize_month};

/// In-memory ledger: an ordered, append-only list of transactions that can
/// be mirrored to and from a ledger file.
/// This is the primary interface for any client (interactive menu, subcommands, tests).
#[derive(Debug, Default, Clone)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Recording
    // ========================

    /// Validate raw user input and append the resulting transaction.
    ///
    /// Nothing is appended unless every field is valid.
    pub fn add(
        &mut self,
        kind: &str,
        category: &str,
        amount: &str,
        date: &str,
        description: &str,
    ) -> Result<&Transaction, AppError> {
        let kind = TransactionKind::from_str(kind)
            .ok_or_else(|| AppError::InvalidKind(kind.trim().to_string()))?;
        let amount_cents = parse_cents(amount)
            .map_err(|e| AppError::InvalidAmount(format!("'{}' ({})", amount.trim(), e)))?;
        let date = parse_date(date).map_err(|_| AppError::InvalidDate(date.trim().to_string()))?;

        self.push(Transaction::new(
            kind,
            category.trim(),
            amount_cents,
            date,
            description.trim(),
        ))
    }

    /// Append an already-built transaction.
    pub fn push(&mut self, transaction: Transaction) -> Result<&Transaction, AppError> {
        if transaction.amount_cents < 0 {
            return Err(AppError::InvalidAmount(format!(
                "{} cents is negative",
                transaction.amount_cents
            )));
        }

        debug!(
            kind = %transaction.kind,
            category = %transaction.category,
            amount_cents = transaction.amount_cents,
            date = %transaction.date,
            "recorded transaction"
        );
        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    // ========================
    // Queries
    // ========================

    /// Every transaction, in insertion order.
    pub fn list_all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn monthly_summary(&self, month: u32, year: i32) -> Result<MonthlySummary, AppError> {
        summarize_month(&self.transactions, month, year)
    }

    // ========================
    // Persistence
    // ========================

    /// Overwrite `path` with every transaction. Returns the number written.
    ///
    /// The file is truncated first; a failure part-way leaves it partial.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<usize, AppError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let written = storage::write_transactions(BufWriter::new(file), &self.transactions)?;
        info!(path = %path.display(), count = written, "saved ledger");
        Ok(written)
    }

    /// Append every transaction stored in `path`. Returns the number loaded.
    ///
    /// A missing file is not an error and loads nothing. The first malformed
    /// line stops the load; rows read before it stay in the store.
    pub fn restore(&mut self, path: impl AsRef<Path>) -> Result<usize, AppError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no ledger file yet, starting empty");
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let mut loaded = 0;
        for transaction in storage::read_transactions(BufReader::new(file)) {
            self.transactions.push(transaction?);
            loaded += 1;
        }

        info!(path = %path.display(), count = loaded, "loaded ledger");
        Ok(loaded)
    }
}
