use crate::action_id::{ActionId, ModuleName};
use thiserror::Error;

/// Misuse of the registration API
///
/// Both variants are programmer errors. They are returned to the caller that
/// triggered them and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Module with name '{0}' already exists")]
    DuplicateModule(ModuleName),

    #[error("Action with name '{0}' already exists")]
    DuplicateAction(ActionId),
}
