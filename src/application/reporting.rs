use serde::{Deserialize, Serialize};

use crate::domain::{Cents, Transaction, TransactionKind};

use super::AppError;

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: Cents,
    pub total_expense: Cents,
    pub net: Cents,
    pub income_count: usize,
    pub expense_count: usize,
}

impl MonthlySummary {
    fn empty(month: u32, year: i32) -> Self {
        Self {
            month,
            year,
            total_income: 0,
            total_expense: 0,
            net: 0,
            income_count: 0,
            expense_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income_count == 0 && self.expense_count == 0
    }
}

/// Sum income and expense amounts dated within `month`/`year`.
/// A month outside 1-12 simply matches nothing.
///
/// Fails if either total no longer fits in `Cents`.
pub fn summarize_month(
    transactions: &[Transaction],
    month: u32,
    year: i32,
) -> Result<MonthlySummary, AppError> {
    let mut summary = MonthlySummary::empty(month, year);
    let overflow = |kind: TransactionKind| {
        AppError::AmountOverflow(format!(
            "total {} for {:02}-{} exceeds the largest representable amount",
            kind, month, year
        ))
    };

    for t in transactions.iter().filter(|t| t.falls_in(month, year)) {
        match t.kind {
            TransactionKind::Income => {
                summary.total_income = summary
                    .total_income
                    .checked_add(t.amount_cents)
                    .ok_or_else(|| overflow(t.kind))?;
                summary.income_count += 1;
            }
            TransactionKind::Expense => {
                summary.total_expense = summary
                    .total_expense
                    .checked_add(t.amount_cents)
                    .ok_or_else(|| overflow(t.kind))?;
                summary.expense_count += 1;
            }
        }
    }

    summary.net = summary
        .total_income
        .checked_sub(summary.total_expense)
        .ok_or_else(|| {
            AppError::AmountOverflow(format!("net balance for {:02}-{}", month, year))
        })?;
    Ok(summary)
}

/// Parse an `MM-yyyy` month selector such as "03-2024" or "3-2024".
pub fn parse_month_year(input: &str) -> Result<(u32, i32), AppError> {
    let input = input.trim();
    let invalid = || AppError::Validation(format!("expected MM-yyyy, got '{}'", input));

    let (month, year) = input.split_once('-').ok_or_else(invalid)?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    Ok((month, year))
}
