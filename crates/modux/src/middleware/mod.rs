//! Middleware seam between the registry and a host store
//!
//! ```text
//! Action → Middleware Chain → Reducer → State
//! ```
//!
//! A host runs every action through its middleware chain in order. Each
//! middleware may inspect the action and the current state, queue further
//! actions through the [`Dispatcher`], and stop the chain by returning `false`.

use crate::action::Action;
use crate::dispatcher::Dispatcher;
use crate::state::GlobalState;

pub mod effects;
pub mod logging;

pub use effects::{EffectContext, EffectMiddleware};
pub use logging::LoggingMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current global state (read-only snapshot)
    /// - `dispatcher`: Use to dispatch actions that should re-enter the chain
    ///
    /// Returns `true` to continue the chain, `false` to consume the action
    fn handle(&mut self, action: &Action, state: &GlobalState, dispatcher: &Dispatcher) -> bool;
}
