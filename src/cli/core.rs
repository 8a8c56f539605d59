//! Shell context, dispatch, and the CLI error types.

use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::booking::{BookingStep, BookingWizard};
use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, ConfigManager};
use crate::errors::CoreError;
use crate::symptoms::SymptomChecker;
use crate::wizard::{FlowStep, WizardError};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;
use super::output::{self, OutputPreferences};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("No booking in progress. Use `book` to start one.")]
    NoBooking,
    #[error("No symptom check in progress. Use `symptom start` first.")]
    NoSymptomCheck,
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Shared CLI runtime state: configuration, lookup tables and the wizards
/// currently in progress.
pub struct ShellContext {
    mode: CliMode,
    registry: CommandRegistry,
    theme: ColorfulTheme,
    config_manager: ConfigManager,
    config: Config,
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    booking: Option<BookingWizard>,
    symptoms: Option<SymptomChecker>,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_parts(mode, config_manager, Arc::new(SystemClock))
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences::from(&config));
        tracing::debug!(path = %config_manager.path().display(), "configuration loaded");

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            catalog: Catalog::standard(),
            clock,
            booking: None,
            symptoms: None,
            last_command: None,
            running: true,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates and persists a configuration change, then re-applies output preferences.
    pub(crate) fn update_config(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        updated.set(key, value)?;
        self.config_manager.save(&updated)?;
        output::set_preferences(OutputPreferences::from(&updated));
        self.config = updated;
        Ok(())
    }

    pub(crate) fn config_path(&self) -> String {
        self.config_manager.path().display().to_string()
    }

    pub fn booking(&self) -> Option<&BookingWizard> {
        self.booking.as_ref()
    }

    pub(crate) fn booking_mut(&mut self) -> Result<&mut BookingWizard, CommandError> {
        self.booking.as_mut().ok_or(CommandError::NoBooking)
    }

    pub(crate) fn start_booking(&mut self) -> &BookingWizard {
        let wizard = BookingWizard::with_horizon(
            Arc::clone(&self.catalog),
            Arc::clone(&self.clock),
            self.config.booking_horizon_days,
        );
        self.booking.insert(wizard)
    }

    pub(crate) fn discard_booking(&mut self) -> Option<BookingWizard> {
        self.booking.take()
    }

    pub fn symptoms(&self) -> Option<&SymptomChecker> {
        self.symptoms.as_ref()
    }

    pub(crate) fn symptoms_mut(&mut self) -> Result<&mut SymptomChecker, CommandError> {
        self.symptoms.as_mut().ok_or(CommandError::NoSymptomCheck)
    }

    pub(crate) fn start_symptom_check(&mut self) -> &SymptomChecker {
        self.symptoms.insert(SymptomChecker::new())
    }

    /// Asks before throwing work away; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        match self.mode {
            CliMode::Script => Ok(true),
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", false).unwrap_or(true))
    }

    pub(crate) fn prompt(&self) -> String {
        match &self.booking {
            Some(wizard) => format!(
                "care[booking {}/{}]> ",
                wizard.step().number(),
                BookingStep::total()
            ),
            None => "care> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|definition| definition.handler) {
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

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &lowered), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Wizard(err) => {
                tracing::warn!(%err, command = ?self.last_command, "wizard rejected command");
                cli_io::print_error(err);
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> ShellContext {
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        ShellContext::with_parts(CliMode::Script, manager, Arc::new(FixedClock::new(today)))
            .unwrap()
    }

    #[test]
    fn booking_commands_require_an_open_booking() {
        let temp = TempDir::new().unwrap();
        let mut context = context(&temp);
        assert!(matches!(
            context.process_line("next"),
            Err(CommandError::NoBooking)
        ));
        context.process_line("book").unwrap();
        assert!(context.booking().is_some());
    }

    #[test]
    fn script_flow_books_an_appointment() {
        let temp = TempDir::new().unwrap();
        let mut context = context(&temp);
        for line in [
            "book",
            "set specialty dermatology",
            "next",
            "set doctor dr-brown",
            "next",
            "set date 2026-10-20",
            "set time \"09:00 AM\"",
            "next",
            "set firstName Ana",
            "set lastName Silva",
            "set email ana@example.com",
            "set phone 555-0100",
        ] {
            context.process_line(line).unwrap();
        }
        assert!(context.booking().unwrap().can_submit());
        context.process_line("submit").unwrap();
        assert!(context.booking().is_none());
    }

    #[test]
    fn out_of_range_navigation_surfaces_wizard_error() {
        let temp = TempDir::new().unwrap();
        let mut context = context(&temp);
        context.process_line("book").unwrap();
        assert!(matches!(
            context.process_line("back"),
            Err(CommandError::Wizard(WizardError::InvalidState { .. }))
        ));
    }

    #[test]
    fn config_updates_apply_to_new_bookings() {
        let temp = TempDir::new().unwrap();
        let mut context = context(&temp);
        context
            .process_line("config set booking_horizon_days 5")
            .unwrap();
        assert_eq!(context.config().booking_horizon_days, 5);
        context.process_line("book").unwrap();
        let window = context.booking().unwrap().date_window();
        assert_eq!(window.latest, NaiveDate::from_ymd_opt(2026, 10, 24).unwrap());
    }

    #[test]
    fn exit_stops_the_loop() {
        let temp = TempDir::new().unwrap();
        let mut context = context(&temp);
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert_eq!(context.process_line("   ").unwrap(), LoopControl::Continue);
        assert_eq!(
            context.process_line("bokk").unwrap(),
            LoopControl::Continue
        );
    }
}
