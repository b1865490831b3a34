mod common;

use std::fs;
use std::path::Path;

use anyhow::Result;
use common::{MarchEntries, test_ledger_path};
use tally::LedgerStore;
use tally::cli::{Menu, SessionEnd};

/// Drive a menu session with scripted input and return how it ended,
/// the final store and everything printed.
fn run_script(
    store: LedgerStore,
    path: &Path,
    script: &str,
) -> Result<(SessionEnd, LedgerStore, String)> {
    let mut output = Vec::new();
    let mut menu = Menu::new(store, path, script.as_bytes(), &mut output);
    let end = menu.run()?;
    let store = menu.into_store();
    Ok((end, store, String::from_utf8(output)?))
}

#[test]
fn test_add_list_and_exit() -> Result<()> {
    let (path, _temp) = test_ledger_path()?;
    let script = "1\nexpense\nFood\n12.50\n2024-03-05\nLunch\n\
                  1\nIncome\nSalary\n2000\n2024-03-01\nPaycheck\n\
                  2\n\
                  5\n";

    let (end, store, output) = run_script(LedgerStore::new(), &path, script)?;

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(store.len(), 2);
    assert_eq!(output.matches("Transaction added successfully!").count(), 2);
    assert!(output.contains("Enter type (income/expense): "));
    assert!(output.contains("Enter date (yyyy-mm-dd): "));
    assert!(output.contains("EXPENSE"));
    assert!(output.contains("2000.00 Paycheck"));
    assert!(output.contains("Goodbye! Your data is saved."));

    assert_eq!(
        fs::read_to_string(&path)?,
        "2024-03-05,expense,Food,12.50,Lunch\n2024-03-01,income,Salary,2000.00,Paycheck\n"
    );
    Ok(())
}

#[test]
fn test_invalid_add_returns_to_menu() -> Result<()> {
    let (path, _temp) = test_ledger_path()?;
    let script = "1\nexpense\nFood\nlots\n2024-03-05\nLunch\n\
                  1\nexpense\nFood\n3\n2024-13-05\nLunch\n\
                  1\nrefund\nFood\n3\n2024-03-05\nLunch\n\
                  2\n5\n";

    let (end, store, output) = run_script(LedgerStore::new(), &path, script)?;

    assert_eq!(end, SessionEnd::Exited);
    assert!(store.is_empty());
    assert!(output.contains("Error: Invalid amount"));
    assert!(output.contains("Error: Invalid date"));
    assert!(output.contains("Error: Invalid transaction type"));
    assert!(output.contains("No transactions found."));
    Ok(())
}

#[test]
fn test_monthly_summary_from_menu() -> Result<()> {
    let (path, _temp) = test_ledger_path()?;
    let script = "3\n03-2024\n3\n07-2024\n3\nmarch\n5\n";

    let (_, _, output) = run_script(MarchEntries::store()?, &path, script)?;

    assert!(output.contains("Summary for 03-2024"));
    assert!(output.contains("Total Income:           2000.00"));
    assert!(output.contains("Total Expense:            12.50"));
    assert!(output.contains("Net Balance:            1987.50"));

    assert!(output.contains("Summary for 07-2024"));
    assert!(output.contains("Net Balance:               0.00"));

    assert!(output.contains("Error: Invalid input: expected MM-yyyy, got 'march'"));
    Ok(())
}

#[test]
fn test_overflowing_summary_is_reported() -> Result<()> {
    let (path, _temp) = test_ledger_path()?;
    let mut store = LedgerStore::new();
    store.add("income", "Bonus", "90000000000000000", "2024-03-01", "First")?;
    store.add("income", "Bonus", "90000000000000000", "2024-03-02", "Second")?;

    let (end, _, output) = run_script(store, &path, "3\n03-2024\n2\n5\n")?;

    assert_eq!(end, SessionEnd::Exited);
    assert!(output.contains("Error: Amount overflow"));
    assert!(!output.contains("Summary for 03-2024"));
    // The session keeps going after the error
    assert!(output.contains("Second"));
    Ok(())
}

#[test]
fn test_invalid_choices_keep_looping() -> Result<()> {
    let (path, _temp) = test_ledger_path()?;
    let script = "9\nhello\n\n5\n";

    let (end, _, output) = run_script(LedgerStore::new(), &path, script)?;

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(output.matches("Invalid choice. Please try again.").count(), 3);
    assert_eq!(output.matches("==== Expense Tracker ====").count(), 4);
    Ok(())
}

#[test]
fn test_export_writes_file_and_continues() -> Result<()> {
    let (path, _temp) = test_ledger_path()?;

    let (end, _, output) = run_script(MarchEntries::store()?, &path, "4\n")?;

    assert_eq!(end, SessionEnd::InputClosed);
    assert!(output.contains(&format!("Transactions exported to {}", path.display())));
    assert!(path.exists());

    let mut reloaded = LedgerStore::new();
    assert_eq!(reloaded.restore(&path)?, 2);
    Ok(())
}

#[test]
fn test_end_of_input_does_not_save() -> Result<()> {
    let (path, _temp) = test_ledger_path()?;
    // Input stops half way through an add
    let script = "1\nexpense\nFood\n";

    let (end, store, _) = run_script(LedgerStore::new(), &path, script)?;

    assert_eq!(end, SessionEnd::InputClosed);
    assert!(store.is_empty());
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_save_failure_is_reported() -> Result<()> {
    let (_path, temp) = test_ledger_path()?;
    let bad_path = temp.path().join("missing").join("transactions.csv");

    let (end, store, output) = run_script(MarchEntries::store()?, &bad_path, "4\n5\n")?;

    assert_eq!(end, SessionEnd::Exited);
    assert_eq!(store.len(), 2);
    assert_eq!(output.matches("Error saving transactions").count(), 2);
    assert!(!output.contains("Transactions exported to"));
    assert!(output.contains("Goodbye!"));
    assert!(!output.contains("Your data is saved"));
    Ok(())
}

#[test]
fn test_restart_restores_previous_session() -> Result<()> {
    let (path, _temp) = test_ledger_path()?;
    let (_, first, _) = run_script(MarchEntries::store()?, &path, "5\n")?;

    let mut store = LedgerStore::new();
    store.restore(&path)?;
    let (_, second, output) = run_script(store, &path, "2\n5\n")?;

    assert_eq!(second.list_all(), first.list_all());
    let lunch = output.find("Lunch").unwrap();
    let paycheck = output.find("Paycheck").unwrap();
    assert!(lunch < paycheck);
    Ok(())
}
