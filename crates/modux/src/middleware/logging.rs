use super::Middleware;
use crate::action::Action;
use crate::dispatcher::Dispatcher;
use crate::state::GlobalState;

/// LoggingMiddleware - logs all actions passing through
#[derive(Debug, Default)]
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &GlobalState, _dispatcher: &Dispatcher) -> bool {
        log::debug!("Action: {:?}", action);
        true // Always pass action through
    }
}
