use std::{env, sync::Arc};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use tracing::warn;

use crate::{
    cli::{
        commands,
        core::CliError,
        io as cli_io,
        output::{self, OutputPreferences},
        registry::CommandRegistry,
    },
    config::{Config, ConfigManager},
    ledger::{Clock, FixedClock, Ledger, SystemClock},
    storage::{load_or_default, JsonFileStore, LoadSource},
};

/// Pins "today" for the shell, mainly for reproducible scripted runs.
pub const TODAY_ENV: &str = "CASH_PROJECTION_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: JsonFileStore,
    pub ledger: Ledger,
    pub source: LoadSource,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        Ok(Self::with_config(mode, config_manager, config, clock_from_env()))
    }

    /// Builds a shell around an already loaded configuration and opens the ledger it points at.
    pub fn with_config(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });

        let store = JsonFileStore::new(config.resolved_ledger_path());
        let sample = JsonFileStore::new(config.resolved_sample_path());
        let opened = load_or_default(&store, &sample, clock);
        if opened.source != LoadSource::Primary {
            cli_io::print_info(format!("Opened {}.", opened.source));
        }

        Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            store,
            ledger: opened.ledger,
            source: opened.source,
            running: true,
        }
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn prompt(&self) -> String {
        let marker = if self.ledger.is_dirty() { "*" } else { "" };
        format!("cash [{}]{}> ", self.ledger.account_name(), marker)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }
}

fn clock_from_env() -> Arc<dyn Clock> {
    let Some(raw) = env::var_os(TODAY_ENV) else {
        return Arc::new(SystemClock);
    };
    let raw = raw.to_string_lossy();
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Arc::new(FixedClock(date)),
        Err(err) => {
            warn!(value = %raw, error = %err, "ignoring invalid {TODAY_ENV}");
            Arc::new(SystemClock)
        }
    }
}
