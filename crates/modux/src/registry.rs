//! Module and action registry
//!
//! One `Registry` holds two tables: declared modules and activated actions.
//! It is an owned value, not ambient global state. Handles are cheap to clone
//! and all clones share the same tables, so a store, its middleware and every
//! module handle see the same registrations, while a second `Registry` (for
//! another store, or another test) sees none of them.
//!
//! Locks are held only for table reads and inserts. User reducers and effects
//! always run after the lock is released, so they may use the registry freely.

use crate::action::{ActionSpec, ActivatedAction};
use crate::action_id::{ActionId, ModuleName};
use crate::error::RegistryError;
use crate::module::Module;
use crate::state::GlobalState;
use crate::value::Value;
use indexmap::map::Entry;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

struct ModuleEntry {
    initial_state: Arc<dyn Value>,
}

#[derive(Default)]
struct Tables {
    modules: IndexMap<ModuleName, ModuleEntry>,
    actions: IndexMap<ActionId, Arc<ActivatedAction>>,
}

/// Shared handle to a module table and an action table
#[derive(Clone, Default)]
pub struct Registry {
    tables: Arc<RwLock<Tables>>,
}

/// Non-owning registry handle held by modules and their actions
///
/// Activated effects may capture other actions, so a strong handle here would
/// keep the tables alive through themselves.
#[derive(Clone)]
pub(crate) struct WeakRegistry {
    tables: Weak<RwLock<Tables>>,
}

impl WeakRegistry {
    pub(crate) fn upgrade(&self) -> Option<Registry> {
        self.tables.upgrade().map(|tables| Registry { tables })
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            tables: Arc::downgrade(&self.tables),
        }
    }

    /// Register a module and get a typed handle to it
    ///
    /// Fails with [`RegistryError::DuplicateModule`] if `name` is taken.
    pub fn create_module<S: Value>(
        &self,
        name: impl Into<ModuleName>,
        initial_state: S,
    ) -> Result<Module<S>, RegistryError> {
        let name = name.into();
        let initial_state = Arc::new(initial_state);

        let mut tables = self.tables.write();
        match tables.modules.entry(name.clone()) {
            Entry::Occupied(_) => return Err(RegistryError::DuplicateModule(name)),
            Entry::Vacant(slot) => {
                let erased: Arc<dyn Value> = initial_state.clone();
                slot.insert(ModuleEntry {
                    initial_state: erased,
                });
            }
        }
        drop(tables);

        log::debug!("Registered module '{}'", name);
        Ok(Module::new(name, initial_state, self.downgrade()))
    }

    /// Insert `spec` into the action table
    ///
    /// This is the explicit half of the two-phase API; [`crate::ActionCreator`]
    /// calls it on first dispatch. Fails with [`RegistryError::DuplicateAction`]
    /// if the id is already activated.
    pub fn activate<S: Value, P: Value>(&self, spec: &ActionSpec<S, P>) -> Result<(), RegistryError> {
        let activated = Arc::new(spec.erase());

        let mut tables = self.tables.write();
        match tables.actions.entry(spec.id().clone()) {
            Entry::Occupied(slot) => Err(RegistryError::DuplicateAction(slot.key().clone())),
            Entry::Vacant(slot) => {
                slot.insert(activated);
                log::debug!(
                    "Activated action '{}' (reducer: {}, effect: {})",
                    spec.id(),
                    spec.has_reducer(),
                    spec.has_effect()
                );
                Ok(())
            }
        }
    }

    pub fn lookup(&self, id: &ActionId) -> Option<Arc<ActivatedAction>> {
        self.tables.read().actions.get(id).cloned()
    }

    pub fn is_activated(&self, id: &ActionId) -> bool {
        self.tables.read().actions.contains_key(id)
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.tables.read().modules.contains_key(name)
    }

    /// Registered module names, in registration order
    pub fn module_names(&self) -> Vec<ModuleName> {
        self.tables.read().modules.keys().cloned().collect()
    }

    /// Activated action ids, in activation order
    pub fn action_ids(&self) -> Vec<ActionId> {
        self.tables.read().actions.keys().cloned().collect()
    }

    /// Global state holding every module's initial state
    ///
    /// A convenience for hosts building their first state. Nothing in the
    /// dispatch path calls it.
    pub fn initial_state(&self) -> GlobalState {
        let tables = self.tables.read();
        tables
            .modules
            .iter()
            .fold(GlobalState::new(), |state, (name, entry)| {
                state.replace_slice(name, Arc::clone(&entry.initial_state))
            })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("Registry")
            .field("modules", &tables.modules.keys().collect::<Vec<_>>())
            .field(
                "actions",
                &tables.actions.keys().map(ActionId::wire_tag).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_id::qualify;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_duplicate_module_fails() {
        let registry = Registry::new();
        registry.create_module("counter", 0_i64).unwrap();

        let err = registry.create_module("counter", 1_i64).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateModule("counter".to_string()));
        assert_eq!(err.to_string(), "Module with name 'counter' already exists");
        assert_eq!(registry.module_names(), vec!["counter".to_string()]);
    }

    #[test]
    fn test_distinct_modules_succeed_in_order() {
        let registry = Registry::new();
        for name in ["b", "a", "c"] {
            registry.create_module(name, ()).unwrap();
        }
        assert_eq!(registry.module_names(), vec!["b", "a", "c"]);
        assert!(registry.has_module("a"));
        assert!(!registry.has_module("d"));
    }

    #[test]
    fn test_registries_are_isolated() {
        let first = Registry::new();
        let second = Registry::new();

        first.create_module("counter", 0_i64).unwrap();
        second.create_module("counter", 0_i64).unwrap();

        let module = first.create_module("other", 0_i64).unwrap();
        first
            .activate(&module.create_action::<()>("ping"))
            .unwrap();

        assert_eq!(first.action_ids().len(), 1);
        assert!(second.action_ids().is_empty());
        assert!(!second.has_module("other"));
    }

    #[test]
    fn test_clones_share_tables() {
        let registry = Registry::new();
        let handle = registry.clone();
        handle.create_module("counter", 0_i64).unwrap();
        assert!(registry.has_module("counter"));
    }

    #[test]
    fn test_explicit_activation_is_unique() {
        let registry = Registry::new();
        let counter = registry.create_module("counter", 0_i64).unwrap();
        let spec = counter
            .create_action::<i64>("add")
            .with_reducer(|s, p, _| s.copied().unwrap_or_default() + p);

        assert!(!registry.is_activated(spec.id()));
        registry.activate(&spec).unwrap();
        assert!(registry.is_activated(spec.id()));

        let err = registry.activate(&spec).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateAction(qualify("counter", "add")));
        assert_eq!(err.to_string(), "Action with name 'add-counter' already exists");
    }

    #[test]
    fn test_lookup_exposes_activated_shape() {
        let registry = Registry::new();
        let log = registry.create_module("log", Vec::<String>::new()).unwrap();
        let spec = log
            .create_action::<String>("write")
            .with_effect(|_, _, _| {});
        registry.activate(&spec).unwrap();

        let activated = registry.lookup(&qualify("log", "write")).unwrap();
        assert_eq!(activated.local_name(), "write");
        assert_eq!(activated.module_name(), "log");
        assert!(!activated.has_reducer());
        assert!(activated.has_effect());
        assert!(registry.lookup(&qualify("log", "read")).is_none());
    }

    #[test]
    fn test_initial_state_collects_modules() {
        let registry = Registry::new();
        registry.create_module("counter", 3_i64).unwrap();
        registry.create_module("name", "modux".to_string()).unwrap();

        let state = registry.initial_state();
        assert_eq!(state.module_names(), vec!["counter", "name"]);
        assert_eq!(state.get::<i64>("counter"), Some(&3));
    }
}
