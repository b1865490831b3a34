// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use tally::LedgerStore;
use tempfile::TempDir;

/// Helper to get a ledger file path inside a fresh temporary directory.
/// The file itself is not created.
pub fn test_ledger_path() -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("transactions.csv");
    Ok((path, temp_dir))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: the two March 2024 entries used across scenarios
pub struct MarchEntries;

impl MarchEntries {
    /// Lunch expense followed by a salary income
    pub fn add_to(store: &mut LedgerStore) -> Result<()> {
        store.add("expense", "Food", "12.50", "2024-03-05", "Lunch")?;
        store.add("income", "Salary", "2000.00", "2024-03-01", "Paycheck")?;
        Ok(())
    }

    /// Fresh store holding the two entries
    pub fn store() -> Result<LedgerStore> {
        let mut store = LedgerStore::new();
        Self::add_to(&mut store)?;
        Ok(store)
    }
}
