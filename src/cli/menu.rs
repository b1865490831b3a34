use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::{AppError, LedgerStore, parse_month_year};

use super::render::{write_summary, write_transaction_table};

/// One entry of the interactive main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Add,
    List,
    Summary,
    Export,
    Exit,
}

impl MenuCommand {
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(MenuCommand::Add),
            2 => Some(MenuCommand::List),
            3 => Some(MenuCommand::Summary),
            4 => Some(MenuCommand::Export),
            5 => Some(MenuCommand::Exit),
            _ => None,
        }
    }

    /// Parse a line typed at the menu prompt.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let input = input.trim();
        let choice: u32 = input
            .parse()
            .map_err(|_| AppError::Validation(format!("'{}' is not a menu number", input)))?;
        Self::from_choice(choice)
            .ok_or_else(|| AppError::Validation(format!("no menu entry {}", choice)))
    }
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user picked Exit; the ledger was saved (or the failure reported).
    Exited,
    /// Input ran out before Exit; nothing was saved.
    InputClosed,
}

/// Line-oriented menu loop. Owns the store and both ends of the console so
/// it can be driven from any reader and captured into any writer.
pub struct Menu<R, W> {
    store: LedgerStore,
    ledger_path: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: LedgerStore, ledger_path: impl Into<PathBuf>, input: R, output: W) -> Self {
        Self {
            store,
            ledger_path: ledger_path.into(),
            input,
            output,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn into_store(self) -> LedgerStore {
        self.store
    }

    /// Show the menu and dispatch choices until Exit or end of input.
    pub fn run(&mut self) -> io::Result<SessionEnd> {
        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("input closed at menu prompt");
                return Ok(SessionEnd::InputClosed);
            };

            let command = match MenuCommand::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    debug!(error = %e, "rejected menu choice");
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            let flow = match command {
                MenuCommand::Add => self.add_transaction()?,
                MenuCommand::List => {
                    write_transaction_table(&mut self.output, self.store.list_all())?;
                    ControlFlow::Continue(())
                }
                MenuCommand::Summary => self.monthly_summary()?,
                MenuCommand::Export => {
                    if self.save()? {
                        writeln!(
                            self.output,
                            "Transactions exported to {}",
                            self.ledger_path.display()
                        )?;
                    }
                    ControlFlow::Continue(())
                }
                MenuCommand::Exit => {
                    if self.save()? {
                        writeln!(self.output, "Goodbye! Your data is saved.")?;
                    } else {
                        writeln!(self.output, "Goodbye!")?;
                    }
                    return Ok(SessionEnd::Exited);
                }
            };

            if flow.is_break() {
                return Ok(SessionEnd::InputClosed);
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "==== Expense Tracker ====")?;
        writeln!(self.output, "1. Add Transaction")?;
        writeln!(self.output, "2. View Transactions")?;
        writeln!(self.output, "3. View Monthly Summary")?;
        writeln!(self.output, "4. Export to CSV")?;
        writeln!(self.output, "5. Exit")?;
        write!(self.output, "Enter your choice: ")?;
        self.output.flush()
    }

    fn add_transaction(&mut self) -> io::Result<ControlFlow<()>> {
        const PROMPTS: [&str; 5] = [
            "Enter type (income/expense): ",
            "Enter category: ",
            "Enter amount: ",
            "Enter date (yyyy-mm-dd): ",
            "Enter description: ",
        ];

        let mut fields = Vec::with_capacity(PROMPTS.len());
        for prompt in PROMPTS {
            match self.prompt(prompt)? {
                Some(value) => fields.push(value),
                None => return Ok(ControlFlow::Break(())),
            }
        }

        match self
            .store
            .add(&fields[0], &fields[1], &fields[2], &fields[3], &fields[4])
        {
            Ok(_) => writeln!(self.output, "Transaction added successfully!")?,
            Err(e) => {
                debug!(error = %e, "rejected transaction");
                writeln!(self.output, "Error: {}", e)?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn monthly_summary(&mut self) -> io::Result<ControlFlow<()>> {
        let Some(input) = self.prompt("Enter month and year (MM-yyyy): ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let summary = parse_month_year(&input)
            .and_then(|(month, year)| self.store.monthly_summary(month, year));
        match summary {
            Ok(summary) => {
                writeln!(self.output)?;
                write_summary(&mut self.output, &summary)?;
            }
            Err(e) => {
                debug!(error = %e, "summary not computed");
                writeln!(self.output, "Error: {}", e)?;
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Persist the store, reporting failure on the console. Returns whether
    /// the file was written.
    fn save(&mut self) -> io::Result<bool> {
        match self.store.persist(&self.ledger_path) {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(path = %self.ledger_path.display(), error = %e, "failed to save ledger");
                writeln!(self.output, "Error saving transactions: {}", e)?;
                Ok(false)
            }
        }
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
