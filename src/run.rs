//! Application execution logic.
//!
//! This module wires the real console, adapter enumeration, config store,
//! and netsh runner together, then dispatches either a single subcommand
//! or the interactive session loop.

use std::io;

use thiserror::Error;

use ipswitch::apply::{
    ApplyOutcome, CommandRunner, DryRunRunner, NetshApplier, NetworkApplier, SystemRunner,
};
use ipswitch::cli::{Cli, Command};
use ipswitch::manager::{AdapterManager, StartupError};
use ipswitch::network::platform::PlatformFetcher;
use ipswitch::network::{AdapterFetcher, AdapterRegistry, FetchError};
use ipswitch::store::{ConfigStore, FileConfigStore, StoreError};
use ipswitch::ui::{ConsoleUi, Interaction, prompt_static_config};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Startup failed before any operation could run.
    #[error(transparent)]
    Startup(#[from] StartupError),

    /// A netsh transition did not complete cleanly.
    #[error("Failed to apply {operation} on adapter {adapter}")]
    ApplyFailed {
        /// Human-readable name of the attempted transition.
        operation: &'static str,
        /// The adapter the transition targeted.
        adapter: String,
    },

    /// Re-enumerating adapters failed mid-session.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The configuration record could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading console input failed.
    #[error("Failed to read input: {0}")]
    Prompt(#[source] io::Error),
}

/// One action from the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Dhcp,
    Static,
    Edit,
    ChangeAdapter,
}

impl MenuAction {
    /// Menu entries in display order.
    const ALL: [Self; 4] = [Self::Dhcp, Self::Static, Self::Edit, Self::ChangeAdapter];

    const fn label(self) -> &'static str {
        match self {
            Self::Dhcp => "Switch to DHCP",
            Self::Static => "Apply the static configuration",
            Self::Edit => "Edit the static configuration",
            Self::ChangeAdapter => "Change adapter",
        }
    }
}

/// Executes the selected operation.
///
/// This function:
/// 1. Builds the platform adapter registry and the console UI
/// 2. Chooses the real or dry-run netsh runner
/// 3. Initializes the adapter manager (adapter selection + config record)
/// 4. Dispatches a one-shot subcommand, or starts the interactive session
///
/// # Errors
///
/// Returns an error if startup fails (no usable adapter, cancelled
/// selection, unreadable config record) or if the requested one-shot
/// operation does not complete cleanly.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - The real console on stdin/stdout
/// - Platform-specific network APIs
#[cfg(not(tarpaulin_include))]
pub fn execute(cli: &Cli) -> Result<(), RunError> {
    let registry = AdapterRegistry::new(PlatformFetcher::default());
    let store = FileConfigStore::new(cli.config_path());

    let runner: Box<dyn CommandRunner> = if cli.dry_run {
        tracing::info!("Dry-run mode enabled - netsh commands will be logged but not executed");
        Box::new(DryRunRunner::new())
    } else {
        Box::new(SystemRunner::new())
    };
    let applier = NetshApplier::new(runner);

    let mut ui = ConsoleUi::new();
    let mut manager =
        AdapterManager::init(&registry, store, applier, &mut ui, cli.adapter.as_deref())?;

    match cli.command {
        Some(command) => run_command(command, &mut manager, &mut ui),
        None => run_session(&registry, &mut manager, &mut ui),
    }
}

/// Runs a single one-shot subcommand against the initialized manager.
fn run_command<S, A>(
    command: Command,
    manager: &mut AdapterManager<S, A>,
    ui: &mut dyn Interaction,
) -> Result<(), RunError>
where
    S: ConfigStore,
    A: NetworkApplier,
{
    match command {
        Command::Dhcp => switch_to_dhcp(manager, ui),
        Command::Static => apply_static(manager, ui),
        Command::Show => {
            ui.show_status(manager.adapter(), manager.config());
            Ok(())
        }
        Command::Edit => edit_config(manager, ui),
    }
}

/// Runs the interactive session loop until the user quits.
///
/// Each iteration shows the managed adapter with its saved configuration,
/// then offers the available operations. Cancelling the menu leaves the
/// session; a failed operation is reported and the session continues.
fn run_session<F, S, A>(
    registry: &AdapterRegistry<F>,
    manager: &mut AdapterManager<S, A>,
    ui: &mut dyn Interaction,
) -> Result<(), RunError>
where
    F: AdapterFetcher,
    S: ConfigStore,
    A: NetworkApplier,
{
    loop {
        ui.show_status(manager.adapter(), manager.config());

        let options = menu_labels();
        let Some(choice) = ui
            .choose("What do you want to do?", &options)
            .map_err(RunError::Prompt)?
        else {
            return Ok(());
        };

        let Some(action) = MenuAction::ALL.get(choice).copied() else {
            continue;
        };

        if let Err(error) = run_menu_action(action, registry, manager, ui) {
            ui.error(&error.to_string());
        }
    }
}

/// Menu entries in display order, matching [`MenuAction::ALL`].
fn menu_labels() -> Vec<String> {
    MenuAction::ALL
        .iter()
        .map(|action| action.label().to_string())
        .collect()
}

/// Executes one interactive menu action.
fn run_menu_action<F, S, A>(
    action: MenuAction,
    registry: &AdapterRegistry<F>,
    manager: &mut AdapterManager<S, A>,
    ui: &mut dyn Interaction,
) -> Result<(), RunError>
where
    F: AdapterFetcher,
    S: ConfigStore,
    A: NetworkApplier,
{
    match action {
        MenuAction::Dhcp => switch_to_dhcp(manager, ui),
        MenuAction::Static => apply_static(manager, ui),
        MenuAction::Edit => edit_config(manager, ui),
        MenuAction::ChangeAdapter => change_adapter(registry, manager, ui),
    }
}

/// Switches the managed adapter to DHCP and reports the outcome.
fn switch_to_dhcp<S, A>(
    manager: &AdapterManager<S, A>,
    ui: &mut dyn Interaction,
) -> Result<(), RunError>
where
    S: ConfigStore,
    A: NetworkApplier,
{
    report_outcome("DHCP", manager.adapter(), &manager.set_dhcp(), ui)
}

/// Applies the saved static configuration and reports the outcome.
fn apply_static<S, A>(
    manager: &AdapterManager<S, A>,
    ui: &mut dyn Interaction,
) -> Result<(), RunError>
where
    S: ConfigStore,
    A: NetworkApplier,
{
    report_outcome(
        "the static configuration",
        manager.adapter(),
        &manager.set_static(),
        ui,
    )
}

/// Prompts for new static values, persists them, then updates memory.
fn edit_config<S, A>(
    manager: &mut AdapterManager<S, A>,
    ui: &mut dyn Interaction,
) -> Result<(), RunError>
where
    S: ConfigStore,
    A: NetworkApplier,
{
    let config = prompt_static_config(ui, Some(manager.config())).map_err(RunError::Prompt)?;
    manager.edit_config(config)?;
    ui.info("Configuration saved.");
    Ok(())
}

/// Lets the user pick a different adapter to manage.
///
/// Every adapter is listed here, not only manageable ones; `netsh`
/// accepts any interface name. Cancelling keeps the current adapter.
fn change_adapter<F, S, A>(
    registry: &AdapterRegistry<F>,
    manager: &mut AdapterManager<S, A>,
    ui: &mut dyn Interaction,
) -> Result<(), RunError>
where
    F: AdapterFetcher,
    S: ConfigStore,
    A: NetworkApplier,
{
    let adapters = registry.all()?;
    if adapters.is_empty() {
        ui.info("No adapters found.");
        return Ok(());
    }

    let options: Vec<String> = adapters.iter().map(ToString::to_string).collect();
    let Some(index) = ui
        .choose("Select the adapter to manage", &options)
        .map_err(RunError::Prompt)?
    else {
        return Ok(());
    };

    if let Some(adapter) = adapters.get(index) {
        manager.change_adapter(adapter.name.clone());
        ui.info(&format!("Now managing {}.", manager.adapter()));
    }

    Ok(())
}

/// Reports each failed netsh step, then the overall result.
fn report_outcome(
    operation: &'static str,
    adapter: &str,
    outcome: &ApplyOutcome,
    ui: &mut dyn Interaction,
) -> Result<(), RunError> {
    for (step, error) in outcome.step_errors() {
        ui.error(&format!("The {step} step failed: {error}"));
    }

    if outcome.is_success() {
        ui.info(&format!("Switched {adapter} to {operation}."));
        Ok(())
    } else {
        Err(RunError::ApplyFailed {
            operation,
            adapter: adapter.to_string(),
        })
    }
}
