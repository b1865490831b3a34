use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Cents, format_cents};

/// Date layout used both for user input and for the ledger file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds, gifts)
    Income,
    /// Money going out (groceries, rent, bills)
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}

/// A single ledger entry. Entries are independent of each other and are
/// kept in the order they were recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    /// Free-text label such as "Food" or "Salary"
    pub category: String,
    /// Amount in cents (never negative)
    pub amount_cents: Cents,
    pub date: NaiveDate,
    pub description: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category: impl Into<String>,
        amount_cents: Cents,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            category: category.into(),
            amount_cents,
            date,
            description: description.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// True if the entry is dated within the given month of the given year.
    pub fn falls_in(&self, month: u32, year: i32) -> bool {
        self.date.month() == month && self.date.year() == year
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.date.format(DATE_FORMAT),
            self.kind.as_str().to_uppercase(),
            self.category,
            format_cents(self.amount_cents),
            self.description
        )
    }
}
