//! Module handles
//!
//! A module owns one slice of global state, stored under its name. The handle
//! returned by [`Registry::create_module`] reads that slice back out of any
//! global state and declares the module's actions.

use crate::action::ActionSpec;
use crate::action_id::ModuleName;
use crate::registry::{Registry, WeakRegistry};
use crate::state::GlobalState;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Typed handle to a registered module
pub struct Module<S> {
    name: ModuleName,
    initial_state: Arc<S>,
    registry: WeakRegistry,
}

impl<S> Clone for Module<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            initial_state: Arc::clone(&self.initial_state),
            registry: self.registry.clone(),
        }
    }
}

impl<S> fmt::Debug for Module<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module").field("name", &self.name).finish()
    }
}

impl<S: Value> Module<S> {
    pub(crate) fn new(name: ModuleName, initial_state: Arc<S>, registry: WeakRegistry) -> Self {
        Self {
            name,
            initial_state,
            registry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// State the module was created with
    ///
    /// Only [`Registry::initial_state`] reads it. Reducers see whatever the
    /// host put into global state.
    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    /// The module's slice of `global`, if the host has one for it
    pub fn state<'g>(&self, global: &'g GlobalState) -> Option<&'g S> {
        global.get::<S>(&self.name)
    }

    /// Declare an action on this module
    ///
    /// The declaration is inert until activated, see [`ActionSpec::lazy`] and
    /// [`Registry::activate`].
    pub fn create_action<P: Value>(&self, local_name: &str) -> ActionSpec<S, P> {
        ActionSpec::new(self.clone(), local_name)
    }

    /// The owning registry, `None` once every [`Registry`] handle is dropped
    pub(crate) fn registry(&self) -> Option<Registry> {
        self.registry.upgrade()
    }
}
