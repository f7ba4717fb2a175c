//! Tests for session startup and the ready-state operations.

use crate::apply::mock::{AppliedCall, MockApplier};
use crate::apply::{ApplyError, ApplyOutcome};
use crate::manager::{AdapterManager, StartupError};
use crate::network::mock::MockFetcher;
use crate::network::{Adapter, AdapterRegistry};
use crate::store::mock::MockConfigStore;
use crate::store::{StaticConfig, StoreError};
use crate::ui::mock::ScriptedInteraction;

fn sample_config() -> StaticConfig {
    StaticConfig::new("192.168.1.50", "255.255.255.0", "192.168.1.1", "8.8.8.8")
}

fn registry_with(adapters: Vec<(&str, Vec<&str>)>) -> AdapterRegistry<MockFetcher> {
    let adapters = adapters
        .into_iter()
        .map(|(name, addrs)| Adapter::new(name, addrs.iter().map(|a| a.parse().unwrap()).collect()))
        .collect();
    AdapterRegistry::new(MockFetcher::with_adapters(adapters))
}

fn single_adapter_registry() -> AdapterRegistry<MockFetcher> {
    registry_with(vec![("Ethernet", vec!["192.168.1.10"])])
}

/// Initializes a manager over one adapter and a seeded store.
fn ready_manager<'a>(
    store: &'a MockConfigStore,
    applier: &'a MockApplier,
) -> AdapterManager<&'a MockConfigStore, &'a MockApplier> {
    let registry = single_adapter_registry();
    let mut ui = ScriptedInteraction::new();
    AdapterManager::init(&registry, store, applier, &mut ui, None).unwrap()
}

mod startup_selection {
    use super::*;

    #[test]
    fn single_manageable_adapter_is_taken_without_prompting() {
        let registry = single_adapter_registry();
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new();

        let manager = AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap();

        assert_eq!(manager.adapter(), "Ethernet");
        assert!(ui.prompted_labels().is_empty());
    }

    #[test]
    fn no_manageable_adapter_is_fatal() {
        let registry = registry_with(vec![("Bluetooth", vec![]), ("Wi-Fi", vec!["169.254.3.7"])]);
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new();

        let error =
            AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap_err();

        assert!(matches!(error, StartupError::NoAdapterFound));
    }

    #[test]
    fn several_adapters_put_the_choice_to_the_user() {
        let registry = registry_with(vec![
            ("Ethernet", vec!["192.168.1.10"]),
            ("Wi-Fi", vec!["192.168.1.20"]),
        ]);
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new().choices([Some(1)]);

        let manager = AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap();

        assert_eq!(manager.adapter(), "Wi-Fi");
    }

    #[test]
    fn cancelling_the_selection_is_fatal() {
        let registry = registry_with(vec![
            ("Ethernet", vec!["192.168.1.10"]),
            ("Wi-Fi", vec!["192.168.1.20"]),
        ]);
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new().choices([None]);

        let error =
            AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap_err();

        assert!(matches!(error, StartupError::SelectionCancelled));
    }

    #[test]
    fn enumeration_failure_is_fatal() {
        let registry = AdapterRegistry::new(MockFetcher::failing("no adapter table"));
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new();

        let error =
            AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap_err();

        assert!(matches!(error, StartupError::Fetch(_)));
    }

    #[test]
    fn preferred_adapter_bypasses_the_prompt() {
        let registry = registry_with(vec![
            ("Ethernet", vec!["192.168.1.10"]),
            ("Wi-Fi", vec!["192.168.1.20"]),
        ]);
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new();

        let manager =
            AdapterManager::init(&registry, &store, &applier, &mut ui, Some("Wi-Fi")).unwrap();

        assert_eq!(manager.adapter(), "Wi-Fi");
    }

    #[test]
    fn unknown_preferred_adapter_is_reported_by_name() {
        let registry = single_adapter_registry();
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new();

        let error = AdapterManager::init(&registry, &store, &applier, &mut ui, Some("Tailscale"))
            .unwrap_err();

        match error {
            StartupError::AdapterNotFound { name } => assert_eq!(name, "Tailscale"),
            other => panic!("Expected AdapterNotFound, got {other:?}"),
        }
    }

    #[test]
    fn preferred_adapter_must_be_manageable() {
        let registry = registry_with(vec![
            ("Ethernet", vec!["192.168.1.10"]),
            ("Bluetooth", vec!["169.254.3.7"]),
        ]);
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new();

        let error = AdapterManager::init(&registry, &store, &applier, &mut ui, Some("Bluetooth"))
            .unwrap_err();

        assert!(matches!(error, StartupError::AdapterNotFound { .. }));
    }
}

mod startup_config {
    use super::*;

    #[test]
    fn saved_record_is_loaded_without_prompting() {
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();

        let manager = ready_manager(&store, &applier);

        assert_eq!(manager.config(), &sample_config());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn first_run_prompts_and_saves_a_record() {
        let registry = single_adapter_registry();
        let store = MockConfigStore::empty();
        let applier = MockApplier::succeeding();
        let mut ui =
            ScriptedInteraction::new().lines(["192.168.1.50", "", "192.168.1.1", ""]);

        let manager = AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap();

        assert_eq!(manager.config(), &sample_config());
        assert_eq!(store.saved(), Some(sample_config()));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn first_run_save_failure_is_fatal() {
        let registry = single_adapter_registry();
        let store = MockConfigStore::empty().failing_save();
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new().lines(["192.168.1.50", "", "192.168.1.1", ""]);

        let error =
            AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap_err();

        assert!(matches!(
            error,
            StartupError::Store(StoreError::Write { .. })
        ));
    }

    #[test]
    fn malformed_record_is_reported_then_replaced() {
        let registry = single_adapter_registry();
        let store = MockConfigStore::corrupted();
        let applier = MockApplier::succeeding();
        let mut ui =
            ScriptedInteraction::new().lines(["192.168.1.50", "", "192.168.1.1", ""]);

        let manager = AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap();

        assert_eq!(ui.errors().len(), 1);
        assert!(ui.errors()[0].contains("parse"));
        assert_eq!(manager.config(), &sample_config());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn unreadable_record_is_fatal() {
        let registry = single_adapter_registry();
        let store = MockConfigStore::unreadable();
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::new();

        let error =
            AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap_err();

        assert!(matches!(error, StartupError::Store(StoreError::Read { .. })));
    }

    #[test]
    fn first_run_input_failure_is_fatal() {
        let registry = single_adapter_registry();
        let store = MockConfigStore::empty();
        let applier = MockApplier::succeeding();
        let mut ui = ScriptedInteraction::failing_input();

        let error =
            AdapterManager::init(&registry, &store, &applier, &mut ui, None).unwrap_err();

        assert!(matches!(error, StartupError::Prompt(_)));
    }
}

mod operations {
    use super::*;

    #[test]
    fn set_dhcp_targets_the_managed_adapter() {
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let manager = ready_manager(&store, &applier);

        let outcome = manager.set_dhcp();

        assert!(outcome.is_success());
        assert_eq!(
            applier.calls(),
            [AppliedCall::Dhcp {
                adapter: "Ethernet".to_string()
            }]
        );
    }

    #[test]
    fn set_static_passes_the_current_record() {
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let manager = ready_manager(&store, &applier);

        let outcome = manager.set_static();

        assert!(outcome.is_success());
        assert_eq!(
            applier.calls(),
            [AppliedCall::Static {
                adapter: "Ethernet".to_string(),
                config: sample_config()
            }]
        );
    }

    #[test]
    fn failed_transition_is_returned_without_retry() {
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::with_outcomes(vec![ApplyOutcome {
            address: Err(ApplyError::Failed {
                command: "netsh".to_string(),
                code: Some(1),
                output: "Access is denied.".to_string(),
            }),
            dns: Ok(()),
        }]);
        let manager = ready_manager(&store, &applier);

        let outcome = manager.set_dhcp();

        assert!(!outcome.is_success());
        assert_eq!(applier.calls().len(), 1);
    }

    #[test]
    fn edit_config_saves_then_updates_memory() {
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut manager = ready_manager(&store, &applier);

        let updated = StaticConfig::new("10.0.0.20", "255.0.0.0", "10.0.0.1", "1.1.1.1");
        manager.edit_config(updated.clone()).unwrap();

        assert_eq!(manager.config(), &updated);
        assert_eq!(store.saved(), Some(updated));
        assert_eq!(store.save_count(), 1);
        assert!(applier.calls().is_empty());
    }

    #[test]
    fn failed_edit_keeps_the_previous_record() {
        let store = MockConfigStore::with_config(sample_config()).failing_save();
        let applier = MockApplier::succeeding();
        let mut manager = ready_manager(&store, &applier);

        let updated = StaticConfig::new("10.0.0.20", "255.0.0.0", "10.0.0.1", "1.1.1.1");
        let result = manager.edit_config(updated);

        assert!(matches!(result, Err(StoreError::Write { .. })));
        assert_eq!(manager.config(), &sample_config());
        assert_eq!(store.saved(), Some(sample_config()));
    }

    #[test]
    fn change_adapter_swaps_the_target_in_memory_only() {
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut manager = ready_manager(&store, &applier);

        manager.change_adapter("Wi-Fi");

        assert_eq!(manager.adapter(), "Wi-Fi");
        assert_eq!(store.save_count(), 0);
        assert!(applier.calls().is_empty());
    }

    #[test]
    fn operations_after_change_target_the_new_adapter() {
        let store = MockConfigStore::with_config(sample_config());
        let applier = MockApplier::succeeding();
        let mut manager = ready_manager(&store, &applier);

        manager.change_adapter("Wi-Fi");
        let _ = manager.set_dhcp();

        assert_eq!(
            applier.calls(),
            [AppliedCall::Dhcp {
                adapter: "Wi-Fi".to_string()
            }]
        );
    }
}
