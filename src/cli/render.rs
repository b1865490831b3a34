use std::io::{self, Write};

use crate::application::MonthlySummary;
use crate::domain::{DATE_FORMAT, Transaction, format_cents};

/// Print the transaction table, or a notice when there is nothing to show.
pub fn write_transaction_table<W: Write>(
    out: &mut W,
    transactions: &[Transaction],
) -> io::Result<()> {
    if transactions.is_empty() {
        writeln!(out, "No transactions found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<12} {:<8} {:<15} {:>12} DESCRIPTION",
        "DATE", "TYPE", "CATEGORY", "AMOUNT"
    )?;
    writeln!(out, "{}", "-".repeat(70))?;

    for t in transactions {
        writeln!(
            out,
            "{:<12} {:<8} {:<15} {:>12} {}",
            t.date.format(DATE_FORMAT).to_string(),
            t.kind.as_str().to_uppercase(),
            t.category,
            format_cents(t.amount_cents),
            t.description
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &MonthlySummary) -> io::Result<()> {
    writeln!(out, "Summary for {:02}-{}", summary.month, summary.year)?;
    writeln!(out)?;
    writeln!(out, "Total Income:   {:>15}", format_cents(summary.total_income))?;
    writeln!(out, "Total Expense:  {:>15}", format_cents(summary.total_expense))?;
    writeln!(out, "{}", "-".repeat(31))?;
    writeln!(out, "Net Balance:    {:>15}", format_cents(summary.net))?;
    Ok(())
}
