//! Root reducer
//!
//! Resolves an incoming action against the registry and, when an activated
//! reducer exists, produces a new global state with only the owning module's
//! slice replaced.

use crate::action::Action;
use crate::registry::Registry;
use crate::state::GlobalState;

/// Outcome of running an action through the root reducer
#[derive(Debug, Clone)]
pub enum Resolution {
    /// No activated action with this id
    Unmatched,
    /// Activated, but effect-only
    NoReducer,
    /// Activated, but the payload is not of the declared type
    PayloadMismatch,
    /// New global state
    Reduced(GlobalState),
}

impl Resolution {
    /// Collapse into the host-facing form: `None` means "no update"
    pub fn into_state(self) -> Option<GlobalState> {
        match self {
            Resolution::Reduced(state) => Some(state),
            Resolution::Unmatched | Resolution::NoReducer | Resolution::PayloadMismatch => None,
        }
    }

    pub fn is_reduced(&self) -> bool {
        matches!(self, Resolution::Reduced(_))
    }
}

impl Registry {
    /// Resolve `action` against `state` and report exactly what happened
    pub fn resolve(&self, state: &GlobalState, action: &Action) -> Resolution {
        let Some(activated) = self.lookup(action.id()) else {
            log::trace!("Reducer: no activated action for '{}'", action.id());
            return Resolution::Unmatched;
        };
        let Some(reducer) = activated.reducer.as_ref() else {
            return Resolution::NoReducer;
        };

        match reducer(state, action.payload()) {
            Some(slice) => Resolution::Reduced(state.replace_slice(activated.module_name(), slice)),
            None => {
                log::warn!(
                    "Reducer: payload of '{}' does not match its declared type",
                    action.id()
                );
                Resolution::PayloadMismatch
            }
        }
    }

    /// Root reducer for a host store
    ///
    /// Returns `None` when the action changes nothing. `state` is never
    /// modified; slices of untouched modules are shared with the result.
    pub fn reduce(&self, state: &GlobalState, action: &Action) -> Option<GlobalState> {
        self.resolve(state, action).into_state()
    }

    /// [`Registry::reduce`] as a function value
    pub fn reducer(
        &self,
    ) -> impl Fn(&GlobalState, &Action) -> Option<GlobalState> + Send + Sync + 'static {
        let registry = self.clone();
        move |state: &GlobalState, action: &Action| registry.reduce(state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_id::qualify;
    use crate::module::Module;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        count: i64,
    }

    fn counter_module(registry: &Registry) -> Module<Counter> {
        registry
            .create_module("counter", Counter { count: 0 })
            .unwrap()
    }

    fn increment_spec(counter: &Module<Counter>) -> crate::ActionSpec<Counter, i64> {
        counter
            .create_action::<i64>("increment")
            .with_reducer(|s, p, _| Counter {
                count: s.map_or(0, |s| s.count) + p,
            })
    }

    #[test]
    fn test_counter_scenario() {
        let registry = Registry::new();
        let counter = counter_module(&registry);
        let increment = increment_spec(&counter);
        registry.activate(&increment).unwrap();

        let state = GlobalState::new().with_slice("counter", Counter { count: 0 });

        let state = registry.reduce(&state, &increment.action(5)).unwrap();
        assert_eq!(counter.state(&state), Some(&Counter { count: 5 }));

        let state = registry.reduce(&state, &increment.action(3)).unwrap();
        assert_eq!(counter.state(&state), Some(&Counter { count: 8 }));
    }

    #[test]
    fn test_unmatched_action_is_ignored() {
        let registry = Registry::new();
        counter_module(&registry);
        let state = GlobalState::new().with_slice("counter", Counter { count: 0 });

        let action = Action::new(qualify("nowhere", "unregistered"), 1_i64);
        assert!(matches!(registry.resolve(&state, &action), Resolution::Unmatched));
        assert!(registry.reduce(&state, &action).is_none());
    }

    #[test]
    fn test_declared_but_inactive_action_is_ignored() {
        let registry = Registry::new();
        let counter = counter_module(&registry);
        let increment = increment_spec(&counter);
        let state = GlobalState::new().with_slice("counter", Counter { count: 0 });

        assert!(registry.reduce(&state, &increment.action(1)).is_none());
    }

    #[test]
    fn test_effect_only_action_has_no_reducer() {
        let registry = Registry::new();
        let counter = counter_module(&registry);
        let log_only = counter
            .create_action::<String>("logOnly")
            .with_effect(|_, _, _| {});
        registry.activate(&log_only).unwrap();

        let state = GlobalState::new();
        let resolution = registry.resolve(&state, &log_only.action("hi".to_string()));
        assert!(matches!(resolution, Resolution::NoReducer));
        assert!(resolution.into_state().is_none());
    }

    #[test]
    fn test_payload_mismatch_is_ignored() {
        let registry = Registry::new();
        let counter = counter_module(&registry);
        let increment = increment_spec(&counter);
        registry.activate(&increment).unwrap();

        let state = GlobalState::new().with_slice("counter", Counter { count: 0 });
        let action = Action::new(increment.id().clone(), "five".to_string());

        assert!(matches!(
            registry.resolve(&state, &action),
            Resolution::PayloadMismatch
        ));
    }

    #[test]
    fn test_reduce_does_not_touch_input_and_shares_other_slices() {
        let registry = Registry::new();
        let counter = counter_module(&registry);
        let increment = increment_spec(&counter);
        registry.activate(&increment).unwrap();

        let state = GlobalState::new()
            .with_slice("counter", Counter { count: 1 })
            .with_slice("settings", vec!["dark".to_string()]);

        let next = registry.reduce(&state, &increment.action(1)).unwrap();

        assert_eq!(counter.state(&state), Some(&Counter { count: 1 }));
        assert_eq!(counter.state(&next), Some(&Counter { count: 2 }));
        assert_eq!(next.module_names(), state.module_names());
        assert!(Arc::ptr_eq(
            state.slice("settings").unwrap(),
            next.slice("settings").unwrap()
        ));
    }

    #[test]
    fn test_reducer_without_slice_sees_none() {
        let registry = Registry::new();
        let counter = counter_module(&registry);
        let increment = increment_spec(&counter);
        registry.activate(&increment).unwrap();

        let next = registry
            .reduce(&GlobalState::new(), &increment.action(4))
            .unwrap();
        assert_eq!(counter.state(&next), Some(&Counter { count: 4 }));
    }

    #[test]
    fn test_reducer_receives_global_state() {
        let registry = Registry::new();
        let counter = counter_module(&registry);
        let sync = counter
            .create_action::<()>("syncFromLimit")
            .with_reducer(|_, _, global| Counter {
                count: global.get::<i64>("limit").copied().unwrap_or_default(),
            });
        registry.activate(&sync).unwrap();

        let state = GlobalState::new().with_slice("limit", 12_i64);
        let next = registry.reduce(&state, &sync.action(())).unwrap();
        assert_eq!(counter.state(&next), Some(&Counter { count: 12 }));
    }

    #[test]
    fn test_reducer_fn_value() {
        let registry = Registry::new();
        let counter = counter_module(&registry);
        let increment = increment_spec(&counter);
        registry.activate(&increment).unwrap();

        let reduce = registry.reducer();
        let next = reduce(&GlobalState::new(), &increment.action(2)).unwrap();
        assert_eq!(counter.state(&next), Some(&Counter { count: 2 }));
    }
}
