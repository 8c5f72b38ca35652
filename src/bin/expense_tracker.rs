use colored::Colorize;
use expense_tracker::cli::{error_message, run_cli};

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("{}", error_message(&err).as_str().red());
        std::process::exit(err.exit_code());
    }
}
