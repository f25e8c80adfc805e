//! Dispatcher for re-entrant action dispatch
//!
//! Effects and middleware never call back into the store while it is in the
//! middle of processing an action. They send follow-up actions through the
//! Dispatcher instead, and the host drains the queue once the current action
//! has been reduced.

use crate::action::Action;
use std::sync::mpsc::{self, Receiver, Sender};

/// Sending half of a host's action queue
#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }

    /// Create a dispatcher together with the receiving end of its queue
    pub fn channel() -> (Self, Receiver<Action>) {
        let (action_tx, action_rx) = mpsc::channel();
        (Self::new(action_tx), action_rx)
    }

    /// Queue an action; it is processed after the action currently in flight
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.action_tx.send(action) {
            log::error!("Dispatcher: failed to send action {}: {}", e.0.id(), e);
        }
    }
}
