//! Dispatch, error reporting and shared argument helpers for the shell.

use std::io;

use rust_decimal::Decimal;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    errors::{ConfigError, FormatError, LedgerError, SaveError},
    ledger::Transaction,
    parser,
    storage::save_ledger,
};

use super::io as cli_io;
pub use super::shell_context::{CliMode, ShellContext};

/// Largest edit distance for which an unknown command gets a suggestion.
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Fatal shell failures.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Recoverable failures reported back to the user; the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("invalid entry: {0}")]
    Format(#[from] FormatError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// What to do with unsaved changes when leaving the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChoice {
    Save,
    Discard,
    Cancel,
}

impl UnsavedChoice {
    const LABELS: [&'static str; 3] = ["Save and exit", "Exit without saving", "Cancel"];

    fn from_index(index: Option<usize>) -> Self {
        match index {
            Some(0) => UnsavedChoice::Save,
            Some(1) => UnsavedChoice::Discard,
            _ => UnsavedChoice::Cancel,
        }
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                cli_io::print_hint(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Format(format) => {
                cli_io::print_error(format!("invalid entry: {format}"));
                cli_io::print_hint("Entries look like `Rent, 2024-01-01, -500, Monthly`.");
            }
            other => cli_io::print_error(other),
        }
    }

    /// Resolves a 1-based row from `list` to the transaction id at that position.
    pub(crate) fn resolve_row(&self, raw: &str) -> Result<Uuid, CommandError> {
        let count = self.ledger.len();
        let row: usize = raw.trim().parse().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a row number"))
        })?;
        if row == 0 || row > count {
            let message = if count == 0 {
                "the ledger has no transactions".to_string()
            } else {
                format!("row {row} is out of range (1-{count})")
            };
            return Err(CommandError::InvalidArguments(message));
        }
        Ok(self.ledger.transactions()[row - 1].id())
    }

    /// 1-based row currently occupied by `id`.
    pub(crate) fn row_of(&self, id: Uuid) -> Option<usize> {
        self.ledger.position(id).map(|index| index + 1)
    }

    pub(crate) fn save(&mut self) -> CommandResult {
        save_ledger(&self.store, &mut self.ledger)?;
        cli_io::print_success(format!("Saved to {}.", self.store.path().display()));
        Ok(())
    }

    /// Returns true when the shell may exit, saving first if the user asks to.
    pub(crate) fn resolve_unsaved_changes(&mut self) -> Result<bool, CommandError> {
        if !self.ledger.is_dirty() {
            return Ok(true);
        }
        if self.mode == CliMode::Script {
            cli_io::print_warning("Discarding unsaved changes.");
            return Ok(true);
        }
        let choice = cli_io::choose(
            &self.theme,
            "You have unsaved changes",
            &UnsavedChoice::LABELS,
            0,
        )
        .map(UnsavedChoice::from_index)?;
        match choice {
            UnsavedChoice::Save => {
                self.save()?;
                Ok(true)
            }
            UnsavedChoice::Discard => Ok(true),
            UnsavedChoice::Cancel => Ok(false),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = super::shell::parse_command_line(line)?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }
}

/// Joins free-form trailing arguments back into one value.
pub(crate) fn join_args(args: &[&str]) -> String {
    args.join(" ").trim().to_string()
}

/// A non-negative amount, or `None` for `none`, `-` and `clear`.
pub(crate) fn parse_optional_amount(raw: &str) -> Result<Option<Decimal>, CommandError> {
    let trimmed = raw.trim();
    if matches!(trimmed.to_ascii_lowercase().as_str(), "none" | "-" | "clear" | "") {
        return Ok(None);
    }
    let amount = parser::parse_amount(trimmed)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CommandError::InvalidArguments(format!(
            "amount must not be negative: `{trimmed}`"
        )));
    }
    Ok(Some(amount))
}

pub(crate) fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

pub(crate) fn format_optional(amount: Option<Decimal>) -> String {
    amount.map(format_amount).unwrap_or_default()
}

/// One-line description used in confirmations and command feedback.
pub(crate) fn describe(txn: &Transaction) -> String {
    let name = if txn.name.is_empty() {
        "(unnamed)"
    } else {
        txn.name.as_str()
    };
    let amount = match (txn.deposit(), txn.payment()) {
        (Some(deposit), _) => format!("deposit {}", format_amount(deposit)),
        (None, Some(payment)) => format!("payment {}", format_amount(payment)),
        (None, None) => "no amount".to_string(),
    };
    format!("'{}' ({} on {})", name, amount, txn.date.format("%Y-%m-%d"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        config::{Config, ConfigManager},
        ledger::{FixedClock, Periodicity},
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tempfile::TempDir;

    pub(crate) fn script_context(temp: &TempDir) -> ShellContext {
        let manager = ConfigManager::with_base_dir(temp.path().join("home")).unwrap();
        let config = Config {
            ledger_path: Some(temp.path().join("CashProjection.json")),
            sample_path: Some(temp.path().join("SampleData.json")),
            ui_color_enabled: false,
            ..Config::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        ShellContext::with_config(CliMode::Script, manager, config, Arc::new(FixedClock(today)))
    }

    fn run(context: &mut ShellContext, lines: &[&str]) -> LoopControl {
        for line in lines {
            match context.process_line(line) {
                Ok(LoopControl::Exit) => return LoopControl::Exit,
                Ok(LoopControl::Continue) => {}
                Err(err) => panic!("`{line}` failed: {err}"),
            }
        }
        LoopControl::Continue
    }

    #[test]
    fn script_builds_and_saves_ledger() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(&temp);
        run(
            &mut context,
            &[
                "balance 1000",
                "add \"Paycheck, 2024-01-05, 800, TwoWeeksPastLast\"",
                "add Rent, 2024-01-01, -500, Monthly",
                "save",
            ],
        );
        let balances: Vec<_> = context
            .ledger
            .transactions()
            .iter()
            .map(|t| t.balance())
            .collect();
        assert_eq!(balances, [dec!(500), dec!(1300)]);
        assert!(!context.ledger.is_dirty());
        assert!(temp.path().join("CashProjection.json").exists());
    }

    #[test]
    fn rows_are_one_based_in_canonical_order() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(&temp);
        run(
            &mut context,
            &[
                "add Later, 2024-02-01, 5, NotApplicable",
                "add Sooner, 2024-01-10, -5, Monthly",
                "edit 1 name Phone bill",
                "advance 1",
            ],
        );
        let txns = context.ledger.transactions();
        assert_eq!(txns[0].name, "Later");
        assert_eq!(txns[1].name, "Phone bill");
        assert_eq!(txns[1].date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(txns[1].periodicity, Periodicity::Monthly);

        assert!(matches!(
            context.resolve_row("3"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            context.resolve_row("zero"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn exit_in_script_mode_discards_changes() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(&temp);
        let control = run(&mut context, &["add", "exit", "list"]);
        assert_eq!(control, LoopControl::Exit);
        assert!(!temp.path().join("CashProjection.json").exists());
    }

    #[test]
    fn unknown_commands_do_not_fail() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(&temp);
        assert_eq!(
            context.process_line("lsit").unwrap(),
            LoopControl::Continue
        );
    }

    #[test]
    fn config_changes_are_saved() {
        let temp = TempDir::new().unwrap();
        let mut context = script_context(&temp);
        run(
            &mut context,
            &["config set warning 1500", "config set color off", "config show"],
        );
        assert_eq!(context.config.warning_threshold, dec!(1500));
        assert!(!context.config.ui_color_enabled);

        let stored = context.config_manager.load().unwrap();
        assert_eq!(stored, context.config);

        assert!(matches!(
            context.process_line("config set danger 1600"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            context.process_line("config set theme dark"),
            Err(CommandError::InvalidArguments(_))
        ));
        assert_eq!(context.config_manager.load().unwrap().danger_threshold, dec!(500));
    }

    #[test]
    fn optional_amounts() {
        assert_eq!(parse_optional_amount("none").unwrap(), None);
        assert_eq!(parse_optional_amount("12.5").unwrap(), Some(dec!(12.5)));
        assert!(parse_optional_amount("-3").is_err());
        assert!(matches!(
            parse_optional_amount("abc"),
            Err(CommandError::Format(FormatError::Amount(_)))
        ));
    }
}
