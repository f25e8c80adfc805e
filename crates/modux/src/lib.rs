//! # modux
//!
//! Namespaced state modules for single-threaded, unidirectional stores.
//!
//! Independent modules register a typed slice of global state and declare
//! actions on it. Each action may carry a reducer (pure slice transition) and
//! an effect (side effect run by middleware). A host store plugs in two
//! things:
//!
//! - [`Registry::reduce`] as its root reducer
//! - [`EffectMiddleware`] (via [`Registry::middleware`]) in its middleware chain
//!
//! ## Example
//!
//! ```rust
//! use modux::{Dispatcher, GlobalState, Middleware, Registry};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Counter {
//!     count: i64,
//! }
//!
//! let registry = Registry::new();
//! let counter = registry.create_module("counter", Counter { count: 0 })?;
//! let increment = counter
//!     .create_action::<i64>("increment")
//!     .with_reducer(|state, step, _global| Counter {
//!         count: state.map_or(0, |s| s.count) + step,
//!     })
//!     .lazy();
//!
//! // The first dispatch activates the action
//! let mut actions = Vec::new();
//! increment.dispatch(5, |action| actions.push(action))?;
//!
//! let (dispatcher, _queue) = Dispatcher::channel();
//! let mut middleware = registry.middleware();
//! let mut state = registry.initial_state();
//! for action in &actions {
//!     if middleware.handle(action, &state, &dispatcher) {
//!         if let Some(next) = registry.reduce(&state, action) {
//!             state = next;
//!         }
//!     }
//! }
//!
//! assert_eq!(counter.state(&state), Some(&Counter { count: 5 }));
//! # Ok::<(), modux::RegistryError>(())
//! ```

pub mod action;
pub mod action_id;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod module;
pub mod reducer;
pub mod registry;
pub mod state;
pub mod value;

pub use action::{Action, ActionCreator, ActionSpec, ActivatedAction, Effect, Reducer};
pub use action_id::{qualify, ActionId, ModuleName, SEPARATOR};
pub use dispatcher::Dispatcher;
pub use error::RegistryError;
pub use middleware::{EffectContext, EffectMiddleware, LoggingMiddleware, Middleware};
pub use module::Module;
pub use reducer::Resolution;
pub use registry::Registry;
pub use state::GlobalState;
pub use value::Value;
