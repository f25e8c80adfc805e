//! Type-erased values stored in global state and carried as payloads

use std::any::Any;
use std::fmt::Debug;

/// Anything that can live in a module slice or travel as an action payload
///
/// Blanket implemented for every `'static` type that is `Debug + Send + Sync`.
pub trait Value: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Debug + Send + Sync> Value for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Downcast an erased value to its concrete type
///
/// Takes `&dyn Value` so the call dispatches through the trait object and
/// never through the blanket impl of a smart pointer wrapping it.
pub fn downcast<T: 'static>(value: &dyn Value) -> Option<&T> {
    value.as_any().downcast_ref::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_downcast_through_arc() {
        let value: Arc<dyn Value> = Arc::new(42_i64);
        assert_eq!(downcast::<i64>(value.as_ref()), Some(&42));
        assert_eq!(downcast::<u32>(value.as_ref()), None);
    }
}
