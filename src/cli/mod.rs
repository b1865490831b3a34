use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::application::{LedgerStore, parse_month_year};
use crate::domain::{DATE_FORMAT, format_cents};
use crate::storage::DEFAULT_LEDGER_FILE;

mod menu;
mod render;

pub use menu::{Menu, MenuCommand, SessionEnd};
pub use render::{write_summary, write_transaction_table};

/// Tally - Income and Expense Ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Record income and expenses in a plain text ledger and review monthly totals")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, env = "TALLY_FILE", default_value = DEFAULT_LEDGER_FILE)]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run a single command instead of the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every transaction in the ledger file
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show income, expense and net totals for one month
    Summary {
        /// Month to summarize (MM-yyyy)
        month: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Install the stderr tracing subscriber. `RUST_LOG` takes precedence over
/// the verbosity flag.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "tally=debug" } else { "tally=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            None => run_interactive(&self.file),

            Some(Commands::List { format }) => {
                let store = load_store(&self.file)?;
                run_list_command(&store, format)
            }

            Some(Commands::Summary { month, format }) => {
                let store = load_store(&self.file)?;
                run_summary_command(&store, &month, format)
            }
        }
    }
}

fn load_store(path: &Path) -> Result<LedgerStore> {
    let mut store = LedgerStore::new();
    store
        .restore(path)
        .with_context(|| format!("Failed to load ledger from {}", path.display()))?;
    Ok(store)
}

fn run_interactive(path: &Path) -> Result<()> {
    let mut store = LedgerStore::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // A bad file is reported and the session continues with whatever loaded.
    if let Err(e) = store.restore(path) {
        warn!(path = %path.display(), error = %e, "failed to load ledger");
        writeln!(out, "Error loading transactions: {}", e)?;
    }

    let stdin = io::stdin();
    let mut menu = Menu::new(store, path, stdin.lock(), out);
    menu.run().context("Interactive session failed")?;
    Ok(())
}

fn run_list_command(store: &LedgerStore, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(store.list_all())?)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(out);
            csv_writer.write_record(["date", "type", "category", "amount", "description"])?;
            for t in store.list_all() {
                csv_writer.write_record([
                    t.date.format(DATE_FORMAT).to_string(),
                    t.kind.as_str().to_string(),
                    t.category.clone(),
                    format_cents(t.amount_cents),
                    t.description.clone(),
                ])?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Table => write_transaction_table(&mut out, store.list_all())?,
    }
    Ok(())
}

fn run_summary_command(store: &LedgerStore, month: &str, format: OutputFormat) -> Result<()> {
    let (month, year) = parse_month_year(month)?;
    let summary = store.monthly_summary(month, year)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "type,amount")?;
            writeln!(out, "income,{}", format_cents(summary.total_income))?;
            writeln!(out, "expense,{}", format_cents(summary.total_expense))?;
            writeln!(out, "net,{}", format_cents(summary.net))?;
        }
        OutputFormat::Table => write_summary(&mut out, &summary)?,
    }
    Ok(())
}
