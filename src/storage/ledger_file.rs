use std::io::{Read, Write};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};

use crate::application::AppError;
use crate::domain::{
    DATE_FORMAT, Transaction, TransactionKind, format_cents, parse_cents, parse_date,
};

/// Number of comma-separated fields on every ledger line.
pub const FIELD_COUNT: usize = 5;

/// Write transactions one per line as `date,kind,category,amount,description`.
///
/// Fields are written verbatim: there is no quoting, so a comma inside a
/// category or description will split that row differently when read back.
pub fn write_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<usize, AppError> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    for transaction in transactions {
        csv_writer.write_record(to_row(transaction))?;
    }

    csv_writer.flush()?;
    Ok(transactions.len())
}

/// Lazily decode ledger lines. Each item is either a transaction or the
/// error for the first line that could not be decoded; callers decide whether
/// to keep what was read before the failure.
pub fn read_transactions<R: Read>(
    reader: R,
) -> impl Iterator<Item = Result<Transaction, AppError>> {
    ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .map(|result| {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            from_row(&record, line)
        })
}

fn to_row(transaction: &Transaction) -> [String; FIELD_COUNT] {
    [
        transaction.date.format(DATE_FORMAT).to_string(),
        transaction.kind.as_str().to_string(),
        transaction.category.clone(),
        format_cents(transaction.amount_cents),
        transaction.description.clone(),
    ]
}

fn from_row(record: &StringRecord, line: u64) -> Result<Transaction, AppError> {
    let malformed = |reason: String| AppError::MalformedRecord { line, reason };

    if record.len() != FIELD_COUNT {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            record.len()
        )));
    }

    let date = parse_date(&record[0])
        .map_err(|_| malformed(format!("invalid date '{}'", &record[0])))?;
    let kind = TransactionKind::from_str(&record[1])
        .ok_or_else(|| malformed(format!("invalid type '{}'", &record[1])))?;
    let amount_cents = parse_cents(&record[3])
        .map_err(|e| malformed(format!("invalid amount '{}': {}", &record[3], e)))?;

    Ok(Transaction::new(kind, &record[2], amount_cents, date, &record[4]))
}
