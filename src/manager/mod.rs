//! Session orchestration: adapter selection, configuration, transitions.
//!
//! [`AdapterManager`] ties the seams together. It is constructed through
//! [`AdapterManager::init`], which walks the startup sequence (discover
//! adapters, settle on one, load or create the configuration record) and
//! only hands out a manager once every operation can actually run.

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::io;

use thiserror::Error;

use crate::apply::{ApplyOutcome, NetworkApplier};
use crate::network::{Adapter, AdapterFetcher, AdapterRegistry, FetchError};
use crate::store::{ConfigStore, StaticConfig, StoreError};
use crate::ui::{self, Interaction};

/// Errors that prevent the session from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// No manageable adapter is present on the system.
    #[error("No manageable network adapter found")]
    NoAdapterFound,

    /// The user dismissed the startup adapter selection.
    #[error("Adapter selection cancelled")]
    SelectionCancelled,

    /// A requested adapter name did not match any manageable adapter.
    #[error("Adapter not found among manageable adapters: {name}")]
    AdapterNotFound {
        /// The name that was requested.
        name: String,
    },

    /// Adapter enumeration failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The configuration record could not be loaded or created.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading interactive input failed.
    #[error("Failed to read input: {0}")]
    Prompt(#[source] io::Error),
}

/// Orchestrates operations against one selected adapter.
///
/// Once constructed, the manager always has an adapter name and a
/// configuration record; operations never have to deal with a partially
/// initialized session. Each operation touches exactly one effect
/// category: transitions run `netsh`, [`Self::edit_config`] writes the
/// store, [`Self::change_adapter`] only swaps the in-memory selection.
#[derive(Debug)]
pub struct AdapterManager<S, A> {
    adapter: String,
    config: StaticConfig,
    store: S,
    applier: A,
}

impl<S: ConfigStore, A: NetworkApplier> AdapterManager<S, A> {
    /// Runs the startup sequence and returns a ready manager.
    ///
    /// Adapter selection follows the number of manageable adapters:
    /// none is fatal, exactly one is taken silently, several are put to
    /// the user. A `preferred` name bypasses the prompt but must match
    /// a manageable adapter exactly.
    ///
    /// A missing configuration record triggers the first-run prompt and
    /// an immediate save. A malformed record is reported, then replaced
    /// the same way.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] when enumeration fails, no adapter can be
    /// settled on, or the record can neither be loaded nor created.
    pub fn init<F: AdapterFetcher>(
        registry: &AdapterRegistry<F>,
        store: S,
        applier: A,
        ui: &mut dyn Interaction,
        preferred: Option<&str>,
    ) -> Result<Self, StartupError> {
        let manageable = registry.manageable()?;
        let adapter = select_adapter(&manageable, ui, preferred)?;
        tracing::info!("Managing adapter: {adapter}");

        let config = load_or_create_config(&store, ui)?;

        Ok(Self {
            adapter,
            config,
            store,
            applier,
        })
    }

    /// Switches the managed adapter to DHCP.
    pub fn set_dhcp(&self) -> ApplyOutcome {
        tracing::info!("Switching {} to DHCP", self.adapter);
        self.applier.apply_dhcp(&self.adapter)
    }

    /// Applies the saved static configuration to the managed adapter.
    pub fn set_static(&self) -> ApplyOutcome {
        tracing::info!(
            "Switching {} to static {}",
            self.adapter,
            self.config.static_ip
        );
        self.applier.apply_static(&self.adapter, &self.config)
    }

    /// Replaces the configuration record.
    ///
    /// The record is persisted first; only a successful save updates the
    /// in-memory copy, so a failed save leaves the previous configuration
    /// in effect.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be written.
    pub fn edit_config(&mut self, config: StaticConfig) -> Result<(), StoreError> {
        self.store.save(&config)?;
        self.config = config;
        Ok(())
    }

    /// Redirects future operations at a different adapter.
    ///
    /// Takes effect immediately and is not persisted; nothing is applied
    /// to either the old or the new adapter.
    pub fn change_adapter(&mut self, adapter: impl Into<String>) {
        self.adapter = adapter.into();
        tracing::info!("Now managing adapter: {}", self.adapter);
    }

    /// The currently managed adapter name.
    #[must_use]
    pub fn adapter(&self) -> &str {
        &self.adapter
    }

    /// The current configuration record.
    #[must_use]
    pub const fn config(&self) -> &StaticConfig {
        &self.config
    }
}

/// Settles on the adapter to manage.
fn select_adapter(
    manageable: &[Adapter],
    ui: &mut dyn Interaction,
    preferred: Option<&str>,
) -> Result<String, StartupError> {
    if let Some(name) = preferred {
        return manageable
            .iter()
            .find(|adapter| adapter.name == name)
            .map(|adapter| adapter.name.clone())
            .ok_or_else(|| StartupError::AdapterNotFound {
                name: name.to_string(),
            });
    }

    match manageable {
        [] => Err(StartupError::NoAdapterFound),
        [single] => Ok(single.name.clone()),
        _ => prompt_adapter_choice(manageable, ui),
    }
}

fn prompt_adapter_choice(
    adapters: &[Adapter],
    ui: &mut dyn Interaction,
) -> Result<String, StartupError> {
    let options: Vec<String> = adapters.iter().map(ToString::to_string).collect();

    let Some(index) = ui
        .choose("Select the adapter to manage", &options)
        .map_err(StartupError::Prompt)?
    else {
        return Err(StartupError::SelectionCancelled);
    };

    let adapter = adapters.get(index).ok_or(StartupError::SelectionCancelled)?;
    Ok(adapter.name.clone())
}

/// Loads the record, or creates it through the first-run prompt.
fn load_or_create_config<S: ConfigStore>(
    store: &S,
    ui: &mut dyn Interaction,
) -> Result<StaticConfig, StartupError> {
    match store.load() {
        Ok(Some(config)) => return Ok(config),
        Ok(None) => tracing::info!("No saved config found, prompting for one"),
        Err(error @ StoreError::Parse { .. }) => {
            // Malformed records are reported, then replaced below
            ui.error(&error.to_string());
            tracing::warn!("Replacing malformed config: {error}");
        }
        Err(error) => return Err(error.into()),
    }

    let config = ui::prompt_static_config(ui, None).map_err(StartupError::Prompt)?;
    store.save(&config)?;
    Ok(config)
}
