use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{
    AmountInput, Currency, EngineError, FileStorage, Storage, TransactionForm, TransactionKind,
    Tracker,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod settings;
mod table;

use settings::{DEFAULT_CONFIG_PATH, Settings};

#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Record income and expenses from the command line")]
struct Cli {
    /// Optional TOML settings file, shared with the terminal UI.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// JSON file holding the stored transactions.
    #[arg(long)]
    storage: Option<String>,

    /// Key the transaction list is stored under.
    #[arg(long)]
    key: Option<String>,

    /// Display currency (BRL, EUR or USD).
    #[arg(long)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every transaction followed by the totals.
    List,
    Add(AddArgs),
    /// Remove the transaction at the given position (as shown by `list`).
    Remove { position: usize },
    /// Print total income, total expense and net.
    Totals,
}

/// Record a new transaction.
#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    description: String,
    /// Amount typed as digits, read as cents: `1050` is 10.50.
    #[arg(long)]
    amount: String,
    /// `income` or `expense`.
    #[arg(long)]
    kind: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("engine={level},tally={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Why a command did not run. `Rejected` carries a message for the user;
/// anything else is a storage failure.
#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Runs one command against `tracker` and returns what should be printed.
fn run<S: Storage>(command: Command, tracker: &mut Tracker<S>) -> Result<String, CliError> {
    let currency = tracker.currency();

    match command {
        Command::List => {
            let view = tracker.view();
            Ok(format!(
                "{}\n{}",
                table::format_table(&view),
                table::format_totals(&view)
            ))
        }
        Command::Add(args) => {
            let kind = match TransactionKind::try_from(args.kind.as_str()) {
                Ok(kind) => Some(kind),
                Err(EngineError::Validation(_)) => None,
                Err(err) => return Err(CliError::Rejected(err.to_string())),
            };
            let form = TransactionForm {
                description: args.description,
                amount: AmountInput::from_raw(&args.amount),
                kind,
            };
            let tx = form
                .validate()
                .map_err(|err| CliError::Rejected(err.to_string()))?;
            let line = format!(
                "added {}: {} ({})\n",
                tx.kind.as_str(),
                tx.description,
                tx.amount.format(currency)
            );
            tracker.add(tx)?;
            tracing::info!(transactions = tracker.ledger().len(), "added from cli");
            Ok(line)
        }
        Command::Remove { position } => {
            let Some(index) = position.checked_sub(1) else {
                return Err(CliError::Rejected("positions start at 1".to_string()));
            };
            match tracker.remove(index) {
                Ok(tx) => {
                    tracing::info!(
                        position,
                        transactions = tracker.ledger().len(),
                        "removed from cli"
                    );
                    Ok(format!(
                        "removed: {} ({})\n",
                        tx.description,
                        tx.amount.format(currency)
                    ))
                }
                Err(EngineError::PositionOutOfRange { len, .. }) => Err(CliError::Rejected(
                    format!("no transaction #{position} (ledger has {len})"),
                )),
                Err(err) => Err(err.into()),
            }
        }
        Command::Totals => Ok(table::format_totals(&tracker.view())),
    }
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let mut settings = Settings::new(&cli.config)?;
    if let Some(storage) = cli.storage {
        settings.storage_path = storage;
    }
    if let Some(key) = cli.key {
        settings.storage_key = key;
    }
    if let Some(currency) = cli.currency {
        settings.currency = currency;
    }

    init_tracing(&settings.log_level);

    let currency = match Currency::try_from(settings.currency.as_str()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let storage = FileStorage::new(&settings.storage_path);
    let mut tracker = Tracker::load(storage, settings.storage_key.as_str(), currency)?;

    match run(cli.command, &mut tracker) {
        Ok(output) => print!("{output}"),
        Err(CliError::Rejected(message)) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
        Err(CliError::Engine(err)) => return Err(err.into()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use engine::{MemoryStorage, Money};

    use super::*;

    fn tracker() -> Tracker<MemoryStorage> {
        Tracker::load(MemoryStorage::new(), "cli", Currency::Brl).unwrap()
    }

    fn add(description: &str, amount: &str, kind: &str) -> Command {
        Command::Add(AddArgs {
            description: description.to_string(),
            amount: amount.to_string(),
            kind: kind.to_string(),
        })
    }

    fn rejection(result: Result<String, CliError>) -> String {
        match result {
            Err(CliError::Rejected(message)) => message,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[test]
    fn add_then_list_numbers_rows_from_one() {
        let mut tracker = tracker();

        let out = run(add("Salary", "250000", "income"), &mut tracker).unwrap();
        assert_eq!(out, "added income: Salary (R$ 2.500,00)\n");
        run(add("Bus", "R$ 4,40", "Expense"), &mut tracker).unwrap();

        let out = run(Command::List, &mut tracker).unwrap();
        assert!(out.starts_with("#  Description       Amount  Kind\n"));
        assert!(out.contains("1  Salary       R$ 2.500,00  Income\n"));
        assert!(out.contains("2  Bus              R$ 4,40  Expense\n"));
        assert!(out.ends_with("Net:           R$ 2.495,60\n"));
    }

    #[test]
    fn remove_takes_one_based_positions() {
        let mut tracker = tracker();
        run(add("Salary", "250000", "income"), &mut tracker).unwrap();
        run(add("Rent", "100000", "expense"), &mut tracker).unwrap();

        let out = run(Command::Remove { position: 1 }, &mut tracker).unwrap();
        assert_eq!(out, "removed: Salary (R$ 2.500,00)\n");
        assert_eq!(tracker.ledger().len(), 1);
        assert_eq!(tracker.totals().net, Money::new(-100_000));
    }

    #[test]
    fn remove_rejects_zero_and_missing_positions() {
        let mut tracker = tracker();
        run(add("Salary", "250000", "income"), &mut tracker).unwrap();

        assert_eq!(
            rejection(run(Command::Remove { position: 0 }, &mut tracker)),
            "positions start at 1"
        );
        assert_eq!(
            rejection(run(Command::Remove { position: 2 }, &mut tracker)),
            "no transaction #2 (ledger has 1)"
        );
        assert_eq!(tracker.ledger().len(), 1);
    }

    #[test]
    fn add_rejects_bad_kinds_and_amounts() {
        let mut tracker = tracker();

        assert_eq!(
            rejection(run(add("Lunch", "1500", ""), &mut tracker)),
            "Fill in all fields!"
        );
        assert_eq!(
            rejection(run(add("Lunch", "1500", "refund"), &mut tracker)),
            "Unknown transaction kind: refund (expected income or expense)"
        );
        assert_eq!(
            rejection(run(add("Lunch", "000", "expense"), &mut tracker)),
            "Enter an amount greater than zero!"
        );
        assert_eq!(
            rejection(run(add("  ", "1500", "expense"), &mut tracker)),
            "Fill in all fields!"
        );
        assert!(tracker.ledger().is_empty());
    }

    #[test]
    fn totals_on_empty_ledger_are_zero() {
        let mut tracker = tracker();
        assert_eq!(
            run(Command::Totals, &mut tracker).unwrap(),
            "Total income:  R$ 0,00\nTotal expense: R$ 0,00\nNet:           R$ 0,00\n"
        );
    }
}
