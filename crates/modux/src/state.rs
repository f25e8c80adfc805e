//! Global state: one slice per module, keyed by module name
//!
//! The core only ever reads a `GlobalState` and builds new ones from it.
//! Cloning is shallow, every slice is shared behind an `Arc`, so replacing one
//! module's slice leaves all other slices pointing at the same allocation.

use crate::action_id::ModuleName;
use crate::value::{downcast, Value};
use indexmap::IndexMap;
use std::sync::Arc;

/// Mapping from module name to that module's state slice
#[derive(Debug, Clone, Default)]
pub struct GlobalState {
    slices: IndexMap<ModuleName, Arc<dyn Value>>,
}

impl GlobalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by hosts to assemble their initial state
    pub fn with_slice<S: Value>(mut self, module: impl Into<ModuleName>, slice: S) -> Self {
        self.slices.insert(module.into(), Arc::new(slice));
        self
    }

    /// Typed read of a module slice
    ///
    /// `None` when the module has no slice yet or the slice is of another type.
    pub fn get<S: 'static>(&self, module: &str) -> Option<&S> {
        self.slices
            .get(module)
            .and_then(|slice| downcast::<S>(slice.as_ref()))
    }

    /// Erased read of a module slice
    pub fn slice(&self, module: &str) -> Option<&Arc<dyn Value>> {
        self.slices.get(module)
    }

    pub fn contains(&self, module: &str) -> bool {
        self.slices.contains_key(module)
    }

    /// Module names in insertion order
    pub fn module_names(&self) -> Vec<ModuleName> {
        self.slices.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// New state with `module`'s slice replaced (or added); `self` is untouched
    pub fn replace_slice(&self, module: &str, slice: Arc<dyn Value>) -> GlobalState {
        let mut next = self.clone();
        next.slices.insert(module.to_string(), slice);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter {
        count: i64,
    }

    #[test]
    fn test_typed_get() {
        let state = GlobalState::new()
            .with_slice("counter", Counter { count: 3 })
            .with_slice("name", "modux".to_string());

        assert_eq!(state.get::<Counter>("counter"), Some(&Counter { count: 3 }));
        assert_eq!(state.get::<String>("name").map(String::as_str), Some("modux"));
        assert_eq!(state.get::<Counter>("name"), None);
        assert_eq!(state.get::<Counter>("missing"), None);
        assert_eq!(state.module_names(), vec!["counter", "name"]);
    }

    #[test]
    fn test_replace_slice_shares_other_slices() {
        let state = GlobalState::new()
            .with_slice("counter", Counter { count: 0 })
            .with_slice("other", vec![1, 2, 3]);

        let next = state.replace_slice("counter", Arc::new(Counter { count: 1 }));

        // input untouched
        assert_eq!(state.get::<Counter>("counter"), Some(&Counter { count: 0 }));
        assert_eq!(next.get::<Counter>("counter"), Some(&Counter { count: 1 }));
        assert!(Arc::ptr_eq(
            state.slice("other").unwrap(),
            next.slice("other").unwrap()
        ));
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_empty_state() {
        let state = GlobalState::new();
        assert!(state.is_empty());
        assert!(!state.contains("counter"));
        assert!(state.slice("counter").is_none());
    }
}
