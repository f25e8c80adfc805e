//! Reference host store for modux
//!
//! The modux core only provides a root reducer and a middleware. This crate is
//! the smallest store that consumes both: it owns the global state, runs each
//! action through its middleware chain, applies the registry's reducer and
//! then processes whatever the middleware queued on the dispatcher.

mod store;

pub use store::Store;
