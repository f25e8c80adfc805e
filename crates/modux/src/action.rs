//! Actions: declaration, lazy activation and the wire record
//!
//! Declaring an action with [`Module::create_action`] is a pure value
//! construction. The registry does not learn about it until it is activated,
//! either explicitly through [`Registry::activate`] or lazily the first time an
//! [`ActionCreator`] dispatches it.
//!
//! ```text
//! create_action ──► ActionSpec ──► lazy() ──► ActionCreator ──► dispatch(payload)
//!                       │                                         │
//!                       └──── Registry::activate ◄── first call ──┘
//! ```

use crate::action_id::{qualify, ActionId};
use crate::dispatcher::Dispatcher;
use crate::error::RegistryError;
use crate::middleware::EffectContext;
use crate::module::Module;
use crate::state::GlobalState;
use crate::value::{downcast, Value};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Pure transition of a module slice: `(slice, payload, global state) -> new slice`
///
/// The slice is `None` while the host has not put one into global state yet.
pub type Reducer<S, P> = Arc<dyn Fn(Option<&S>, &P, &GlobalState) -> S + Send + Sync>;

/// Side effect run by the middleware before the action moves on
pub type Effect<S, P> = Arc<dyn Fn(Option<&S>, &P, &EffectContext<'_>) + Send + Sync>;

/// Reducer with slice and payload types erased; `None` on payload type mismatch
pub(crate) type ErasedReducer =
    Arc<dyn Fn(&GlobalState, &dyn Value) -> Option<Arc<dyn Value>> + Send + Sync>;

/// Effect with payload type erased; `false` on payload type mismatch
pub(crate) type ErasedEffect = Arc<dyn Fn(&dyn Value, &EffectContext<'_>) -> bool + Send + Sync>;

/// Action record as seen by the host store: `{ type, payload }`
#[derive(Clone)]
pub struct Action {
    id: ActionId,
    payload: Arc<dyn Value>,
}

impl Action {
    pub fn new<P: Value>(id: ActionId, payload: P) -> Self {
        Self {
            id,
            payload: Arc::new(payload),
        }
    }

    /// The action's `type`
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    pub fn payload(&self) -> &dyn Value {
        self.payload.as_ref()
    }

    /// Typed view of the payload
    pub fn payload_as<P: 'static>(&self) -> Option<&P> {
        downcast::<P>(self.payload.as_ref())
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("type", &self.id.wire_tag())
            .field("payload", &self.payload)
            .finish()
    }
}

/// Declaration of an action on a module, not yet known to the registry
pub struct ActionSpec<S, P> {
    id: ActionId,
    module: Module<S>,
    reducer: Option<Reducer<S, P>>,
    effect: Option<Effect<S, P>>,
}

impl<S, P> Clone for ActionSpec<S, P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            module: self.module.clone(),
            reducer: self.reducer.clone(),
            effect: self.effect.clone(),
        }
    }
}

impl<S, P> fmt::Debug for ActionSpec<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSpec")
            .field("id", &self.id.wire_tag())
            .field("reducer", &self.reducer.is_some())
            .field("effect", &self.effect.is_some())
            .finish()
    }
}

impl<S: Value, P: Value> ActionSpec<S, P> {
    pub(crate) fn new(module: Module<S>, local_name: &str) -> Self {
        Self {
            id: qualify(module.name(), local_name),
            module,
            reducer: None,
            effect: None,
        }
    }

    pub fn with_reducer<F>(mut self, reducer: F) -> Self
    where
        F: Fn(Option<&S>, &P, &GlobalState) -> S + Send + Sync + 'static,
    {
        self.reducer = Some(Arc::new(reducer));
        self
    }

    pub fn with_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(Option<&S>, &P, &EffectContext<'_>) + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(effect));
        self
    }

    /// Qualified id, available before the action is ever activated
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    pub fn local_name(&self) -> &str {
        self.id.action()
    }

    pub fn module(&self) -> &Module<S> {
        &self.module
    }

    pub fn has_reducer(&self) -> bool {
        self.reducer.is_some()
    }

    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }

    /// Build the wire record for `payload` without touching the registry
    pub fn action(&self, payload: P) -> Action {
        Action::new(self.id.clone(), payload)
    }

    /// Turn the declaration into a creator that activates on first dispatch
    pub fn lazy(self) -> ActionCreator<S, P> {
        ActionCreator {
            spec: self,
            activated: Arc::new(Mutex::new(false)),
        }
    }

    /// Erase slice and payload types for storage in the registry
    pub(crate) fn erase(&self) -> ActivatedAction {
        let module = self.module.name().to_string();

        let reducer = self.reducer.clone().map(|reducer| {
            let module = module.clone();
            let erased: ErasedReducer =
                Arc::new(move |global: &GlobalState, payload: &dyn Value| {
                    let payload = downcast::<P>(payload)?;
                    let slice = global.get::<S>(&module);
                    let next: Arc<dyn Value> = Arc::new(reducer(slice, payload, global));
                    Some(next)
                });
            erased
        });

        let effect = self.effect.clone().map(|effect| {
            let erased: ErasedEffect =
                Arc::new(move |payload: &dyn Value, ctx: &EffectContext<'_>| {
                    match downcast::<P>(payload) {
                        Some(payload) => {
                            effect(ctx.state().get::<S>(&module), payload, ctx);
                            true
                        }
                        None => false,
                    }
                });
            erased
        });

        ActivatedAction {
            id: self.id.clone(),
            reducer,
            effect,
        }
    }
}

/// Dispatch-ready handle of an [`ActionSpec`] with lazy activation
///
/// The first dispatch through a creator activates its spec in the module's
/// registry and fails with [`RegistryError::DuplicateAction`] if another
/// declaration already activated the same id. Later dispatches through the
/// same creator, or any clone of it, only build and send the action.
///
/// Creators hold their registry weakly. Once every [`crate::Registry`] handle
/// is gone, dispatching is a logged no-op.
pub struct ActionCreator<S, P> {
    spec: ActionSpec<S, P>,
    activated: Arc<Mutex<bool>>,
}

impl<S, P> Clone for ActionCreator<S, P> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            activated: Arc::clone(&self.activated),
        }
    }
}

impl<S, P> fmt::Debug for ActionCreator<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("spec", &self.spec)
            .field("activated", &*self.activated.lock())
            .finish()
    }
}

impl<S: Value, P: Value> ActionCreator<S, P> {
    pub fn id(&self) -> &ActionId {
        self.spec.id()
    }

    pub fn spec(&self) -> &ActionSpec<S, P> {
        &self.spec
    }

    /// Whether this creator has activated its spec
    pub fn is_activated(&self) -> bool {
        *self.activated.lock()
    }

    /// Curried form: `action_factory(payload)(dispatch)`
    pub fn action_factory<D>(
        &self,
        payload: P,
    ) -> impl FnOnce(D) -> Result<(), RegistryError> + '_
    where
        D: FnOnce(Action),
    {
        move |dispatch: D| self.dispatch(payload, dispatch)
    }

    /// Activate on first use, then hand `{ type, payload }` to `dispatch`
    pub fn dispatch<D>(&self, payload: P, dispatch: D) -> Result<(), RegistryError>
    where
        D: FnOnce(Action),
    {
        if !self.ensure_activated()? {
            log::warn!(
                "Dropping '{}': its registry no longer exists",
                self.spec.id()
            );
            return Ok(());
        }
        dispatch(self.spec.action(payload));
        Ok(())
    }

    /// Activate on first use, then queue the action on `dispatcher`
    pub fn dispatch_to(&self, payload: P, dispatcher: &Dispatcher) -> Result<(), RegistryError> {
        self.dispatch(payload, |action| dispatcher.dispatch(action))
    }

    /// `Ok(false)` when the registry is gone
    fn ensure_activated(&self) -> Result<bool, RegistryError> {
        let Some(registry) = self.spec.module().registry() else {
            return Ok(false);
        };

        // held across activation so concurrent clones activate exactly once
        let mut activated = self.activated.lock();
        if !*activated {
            registry.activate(&self.spec)?;
            *activated = true;
        }
        Ok(true)
    }
}

/// Registry-side form of an activated action, types erased
pub struct ActivatedAction {
    id: ActionId,
    pub(crate) reducer: Option<ErasedReducer>,
    pub(crate) effect: Option<ErasedEffect>,
}

impl ActivatedAction {
    pub fn id(&self) -> &ActionId {
        &self.id
    }

    pub fn local_name(&self) -> &str {
        self.id.action()
    }

    pub fn module_name(&self) -> &str {
        self.id.module()
    }

    pub fn has_reducer(&self) -> bool {
        self.reducer.is_some()
    }

    pub fn has_effect(&self) -> bool {
        self.effect.is_some()
    }
}

impl fmt::Debug for ActivatedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivatedAction")
            .field("id", &self.id.wire_tag())
            .field("reducer", &self.reducer.is_some())
            .field("effect", &self.effect.is_some())
            .finish()
    }
}
