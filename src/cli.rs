//! Command line dispatcher: parses arguments, drives the [`Ledger`] and prints results.

use std::{
    io::{self, IsTerminal, Write},
    path::PathBuf,
};

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::{
    config::{ConfigManager, DATA_FILE_ENV},
    display::{render_expenses, render_summary},
    errors::{CliError, ExpenseError},
    ledger::{ExpenseUpdate, Ledger},
    storage::JsonExpenseStore,
    utils::init_tracing,
};

/// Track personal expenses in a local JSON file.
#[derive(Parser, Debug)]
#[command(name = "expense-tracker", version, about, long_about = None)]
pub struct Cli {
    /// Expense file to read and write
    #[arg(long, global = true, env = DATA_FILE_ENV)]
    pub file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new expense
    Add {
        #[arg(long)]
        description: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Date of the expense (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Change fields of an existing expense
    Update {
        #[arg(long, allow_negative_numbers = true)]
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<f64>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove an expense by id
    Delete {
        #[arg(long, allow_negative_numbers = true)]
        id: i64,
    },
    /// Show all expenses
    List,
    /// Show total spending, optionally for one month of the current year
    Summary {
        /// Month number (1-12)
        #[arg(long)]
        month: Option<u32>,
    },
}

/// Parses process arguments and runs the requested command.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.plain || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(ExpenseError::from)?;
        return Ok(());
    };

    let config = ConfigManager::default_location().load()?;
    let path = config.resolve_data_file(cli.file.as_deref());
    debug!(path = %path.display(), "using expense file");
    let ledger = Ledger::with_system_clock(JsonExpenseStore::new(path));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&ledger, command, &config.currency_symbol, &mut out)
}

/// Runs one command against `ledger`, writing user-facing output to `out`.
pub fn execute(
    ledger: &Ledger,
    command: Command,
    symbol: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Add {
            description,
            amount,
            date,
        } => {
            let id = ledger.add(&description, amount, date.as_deref())?;
            print_success(out, &format!("Expense added successfully (ID: {id})"))?;
        }
        Command::Update {
            id,
            description,
            amount,
            date,
        } => {
            let changes = ExpenseUpdate {
                description,
                amount,
                date,
            };
            if ledger.update(id, &changes)? {
                print_success(out, "Expense updated successfully")?;
            } else {
                print_not_found(out)?;
            }
        }
        Command::Delete { id } => {
            if ledger.delete(id)? {
                print_success(out, "Expense deleted successfully")?;
            } else {
                print_not_found(out)?;
            }
        }
        Command::List => {
            let expenses = ledger.list()?;
            writeln!(out, "{}", render_expenses(&expenses, symbol)).map_err(ExpenseError::from)?;
        }
        Command::Summary { month } => {
            let total = ledger.summary(month)?;
            writeln!(out, "{}", render_summary(total, month, symbol))
                .map_err(ExpenseError::from)?;
        }
    }
    Ok(())
}

/// One-line description of a failure for stderr.
pub fn error_message(err: &CliError) -> String {
    match err {
        CliError::Core(core) if core.is_corruption() => format!("Aborted: {core}"),
        other => format!("Error: {other}"),
    }
}

fn print_success(out: &mut impl Write, message: &str) -> Result<(), CliError> {
    writeln!(out, "{}", message.green()).map_err(ExpenseError::from)?;
    Ok(())
}

fn print_not_found(out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{}", "Expense ID not found".yellow()).map_err(ExpenseError::from)?;
    Ok(())
}
