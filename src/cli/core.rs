//! Core CLI state, dispatch, and shared argument parsing.

use std::io;

use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    advisor::{Advisor, HeuristicAdvisor},
    config::{ConfigManager, Settings},
    core::services::{BudgetService, ServiceError},
    domain::{BudgetBook, MonthKey, SavingsGoal, Transaction},
    errors::BudgetError,
    storage::{JsonStore, StateStore},
};

pub use crate::errors::CliError;

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub(crate) fn from_core(error: BudgetError) -> Self {
        CommandError::Core(error)
    }
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(err) => CommandError::Core(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Shared runtime state for the interactive shell and script runner.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: JsonStore,
    pub config_manager: ConfigManager,
    pub settings: Settings,
    pub book: BudgetBook,
    pub current_month: MonthKey,
    pub advisor: Box<dyn Advisor>,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let settings = config_manager.load()?;
        let store = JsonStore::new(None, settings.backup_retention)?;
        Self::from_parts(mode, config_manager, settings, store)
    }

    #[cfg(test)]
    pub(crate) fn with_base_dir(
        mode: CliMode,
        base: std::path::PathBuf,
    ) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let settings = config_manager.load()?;
        let store = JsonStore::new(Some(base), settings.backup_retention)?;
        Self::from_parts(mode, config_manager, settings, store)
    }

    fn from_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        settings: Settings,
        store: JsonStore,
    ) -> Result<Self, CliError> {
        let mut book = store.load()?;
        let current_month = MonthKey::of(Local::now().date_naive());
        if BudgetService::ensure_month(&mut book, current_month, &settings.planned_defaults()) {
            store.save(&book)?;
        }

        Ok(ShellContext {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            config_manager,
            settings,
            book,
            current_month,
            advisor: Box::new(HeuristicAdvisor::new()),
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        format!("zenbudget {}> ", self.current_month)
    }

    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, month: {}, last_command: {:?} }}",
            self.running, self.current_month, self.last_command
        )
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    /// Confirmation for destructive actions. Script mode never blocks
    /// on a prompt and answers yes.
    pub(crate) fn confirm_destructive(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }

    pub(crate) fn persist(&mut self) -> CommandResult {
        self.store.save(&self.book).map_err(CommandError::from_core)
    }

    /// Seeds the active month's budget with default lines when it has
    /// none yet, persisting only when something was added.
    pub(crate) fn seed_active_month(&mut self) -> CommandResult {
        let defaults = self.settings.planned_defaults();
        if BudgetService::ensure_month(&mut self.book, self.current_month, &defaults) {
            self.persist()?;
        }
        Ok(())
    }

    pub(crate) fn set_month(&mut self, month: MonthKey) -> CommandResult {
        self.current_month = month;
        self.seed_active_month()
    }

    pub(crate) fn format_amount(&self, value: f64) -> String {
        if value < 0.0 {
            format!("-{}{:.2}", self.settings.currency_symbol, value.abs())
        } else {
            format!("{}{:.2}", self.settings.currency_symbol, value)
        }
    }

    pub(crate) fn find_transaction_by_prefix(
        &self,
        prefix: &str,
    ) -> Result<&Transaction, CommandError> {
        let needle = prefix.to_lowercase();
        let matches: Vec<&Transaction> = self
            .book
            .transactions
            .iter()
            .filter(|txn| txn.id.to_string().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [] => Err(CommandError::InvalidArguments(format!(
                "no transaction matches id `{}`. Use `list` to see ids.",
                prefix
            ))),
            [only] => Ok(only),
            _ => Err(CommandError::InvalidArguments(format!(
                "`{}` matches {} transactions; use more characters",
                prefix,
                matches.len()
            ))),
        }
    }

    pub(crate) fn find_goal_by_prefix(&self, prefix: &str) -> Result<&SavingsGoal, CommandError> {
        let needle = prefix.to_lowercase();
        let matches: Vec<&SavingsGoal> = self
            .book
            .goals
            .iter()
            .filter(|goal| goal.id.to_string().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [] => Err(CommandError::InvalidArguments(format!(
                "no goal matches id `{}`. Use `goals` to see ids.",
                prefix
            ))),
            [only] => Ok(only),
            _ => Err(CommandError::InvalidArguments(format!(
                "`{}` matches {} goals; use more characters",
                prefix,
                matches.len()
            ))),
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}

pub(crate) fn short_id(id: Uuid) -> String {
    id.to_string().chars().take(8).collect()
}

/// Accepts `today` or an ISO date, with the US slash form as fallback.
pub(crate) fn parse_date_arg(value: &str) -> Result<NaiveDate, CommandError> {
    if value.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .map_err(|_| {
            CommandError::InvalidArguments(format!(
                "`{}` is not a date; use YYYY-MM-DD or `today`",
                value
            ))
        })
}

pub(crate) fn parse_positive_amount(value: &str) -> Result<f64, CommandError> {
    let amount: f64 = value.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a number", value))
    })?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CommandError::InvalidArguments(
            "amount must be greater than zero".into(),
        ));
    }
    Ok(amount)
}

pub(crate) fn parse_non_negative_amount(value: &str) -> Result<f64, CommandError> {
    let amount: f64 = value.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a number", value))
    })?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(CommandError::InvalidArguments(
            "amount cannot be negative".into(),
        ));
    }
    Ok(amount)
}

/// Signed amounts are used where a delta may pay in or draw down.
pub(crate) fn parse_signed_amount(value: &str) -> Result<f64, CommandError> {
    let amount: f64 = value.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a number", value))
    })?;
    if !amount.is_finite() {
        return Err(CommandError::InvalidArguments(
            "amount must be a finite number".into(),
        ));
    }
    Ok(amount)
}

pub(crate) fn parse_month_arg(value: &str) -> Result<MonthKey, CommandError> {
    value
        .parse()
        .map_err(|err: BudgetError| CommandError::InvalidArguments(err.to_string()))
}
