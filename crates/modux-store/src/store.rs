use modux::{Action, Dispatcher, GlobalState, Middleware, Registry};
use std::sync::mpsc::Receiver;

/// Store - holds global state and runs the dispatch loop
pub struct Store {
    state: GlobalState,
    registry: Registry,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    pending: Receiver<Action>,
}

impl Store {
    /// Create a store whose state starts from every module's initial state
    pub fn new(registry: Registry) -> Self {
        let state = registry.initial_state();
        Self::with_state(registry, state)
    }

    pub fn with_state(registry: Registry, initial_state: GlobalState) -> Self {
        let (dispatcher, pending) = Dispatcher::channel();
        Self {
            state: initial_state,
            registry,
            middleware: Vec::new(),
            dispatcher,
            pending,
        }
    }

    /// Add middleware to the store
    ///
    /// Middleware is called in the order it was added.
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Get the current state
    pub fn state(&self) -> &GlobalState {
        &self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Process an action through middleware chain and reducer
    ///
    /// Actions queued on the dispatcher while handling it are processed
    /// afterwards, in the order they were queued.
    pub fn dispatch(&mut self, action: Action) {
        self.process(action);

        while let Ok(action) = self.pending.try_recv() {
            self.process(action);
        }
    }

    fn process(&mut self, action: Action) {
        let mut should_reduce = true;

        // Pass through middleware chain
        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                should_reduce = false;
                break;
            }
        }

        if !should_reduce {
            log::trace!("Store: '{}' consumed by middleware", action.id());
            return;
        }

        // `None` from the reducer means the action changes nothing
        if let Some(next) = self.registry.reduce(&self.state, &action) {
            self.state = next;
        }
    }
}
