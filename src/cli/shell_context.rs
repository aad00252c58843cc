use std::sync::Arc;

use strsim::levenshtein;
use tracing::{debug, info};

use tally_core::Clock;
use tally_domain::UserContext;
use tally_storage_json::JsonDataStore;

use crate::cli::commands;
use crate::cli::core::{CliError, CommandError, CommandResult, LoopControl};
use crate::cli::formatters::AmountFormat;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::system_clock::{FixedClock, SystemClock};
use crate::config::{self, Config, ConfigManager};
use crate::errors::TallyError;
use crate::services::OrganizerService;

/// Largest edit distance still offered as a suggestion.
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub organizer: OrganizerService<JsonDataStore>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = config::default_manager()?;
        Self::with_manager(mode, config_manager)
    }

    pub fn with_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load_or_init()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });

        let store = JsonDataStore::new(config_manager.data_root(&config))?;
        let clock: Arc<dyn Clock> = match FixedClock::from_env() {
            Some(fixed) => {
                debug!(today = %fixed.today(), "using fixed clock");
                Arc::new(fixed)
            }
            None => Arc::new(SystemClock),
        };
        let organizer = OrganizerService::new(store, UserContext::new(config.profile_id), clock);
        info!(
            profile = %config.profile_id,
            data_root = %organizer.store().root().display(),
            "shell context ready"
        );

        Ok(Self {
            mode,
            registry,
            organizer,
            config_manager,
            config,
            last_command: None,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("tally [{}]> ", self.config.default_period.key())
    }

    pub fn amount_format(&self) -> AmountFormat {
        AmountFormat::from_config(&self.config)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Saves the current config and reapplies output preferences.
    pub(crate) fn persist_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled,
        });
        Ok(())
    }

    /// Points the organizer at the configured data root again.
    pub(crate) fn reload_store(&mut self) -> CommandResult {
        let root = self.config_manager.data_root(&self.config);
        let store = JsonDataStore::new(root).map_err(TallyError::from)?;
        self.organizer = self.organizer.rebind(store);
        Ok(())
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
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other.to_string());
                Ok(())
            }
        }
    }
}
