//! Effect middleware
//!
//! Runs the effect of an activated action synchronously, before the action
//! continues down the chain. Effects run whether or not the action also has a
//! reducer. Anything an effect wants to change goes through the store it is
//! handed: read state, queue actions.

use super::Middleware;
use crate::action::Action;
use crate::dispatcher::Dispatcher;
use crate::registry::Registry;
use crate::state::GlobalState;

/// The store as seen by an effect
pub struct EffectContext<'a> {
    state: &'a GlobalState,
    dispatcher: &'a Dispatcher,
}

impl<'a> EffectContext<'a> {
    pub fn new(state: &'a GlobalState, dispatcher: &'a Dispatcher) -> Self {
        Self { state, dispatcher }
    }

    /// Global state at the time the action entered the middleware
    pub fn state(&self) -> &'a GlobalState {
        self.state
    }

    pub fn dispatcher(&self) -> &'a Dispatcher {
        self.dispatcher
    }

    /// Queue a follow-up action
    pub fn dispatch(&self, action: Action) {
        self.dispatcher.dispatch(action);
    }
}

/// Middleware that runs registered effects and never consumes an action
#[derive(Debug, Clone)]
pub struct EffectMiddleware {
    registry: Registry,
}

impl EffectMiddleware {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Curried middleware shape for hosts without a chain:
    /// run the effect (if any), then call `next` with the untouched action
    pub fn apply<N>(&self, action: Action, state: &GlobalState, dispatcher: &Dispatcher, next: N)
    where
        N: FnOnce(Action),
    {
        self.registry.run_effect(&action, state, dispatcher);
        next(action);
    }
}

impl Middleware for EffectMiddleware {
    fn handle(&mut self, action: &Action, state: &GlobalState, dispatcher: &Dispatcher) -> bool {
        self.registry.run_effect(action, state, dispatcher);
        true
    }
}

impl Registry {
    /// Middleware running this registry's effects
    pub fn middleware(&self) -> EffectMiddleware {
        EffectMiddleware::new(self.clone())
    }

    /// Run the effect registered for `action`, if any
    ///
    /// Returns whether an effect ran.
    pub fn run_effect(&self, action: &Action, state: &GlobalState, dispatcher: &Dispatcher) -> bool {
        let Some(activated) = self.lookup(action.id()) else {
            return false;
        };
        let Some(effect) = activated.effect.as_ref() else {
            return false;
        };

        let ctx = EffectContext::new(state, dispatcher);
        let ran = effect(action.payload(), &ctx);
        if !ran {
            log::warn!(
                "Effect: payload of '{}' does not match its declared type",
                action.id()
            );
        }
        ran
    }
}
