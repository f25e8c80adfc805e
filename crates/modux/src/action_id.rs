//! Qualified action identifiers
//!
//! An action is named locally inside its module. The qualified id pairs the
//! local name with the owning module name, so two modules can both declare an
//! `increment` action without colliding.
//!
//! The id is kept as a structured pair. Only its wire tag is a flat string:
//! `"<localName>-<moduleName>"`, which is what stores, loggers and devtools see
//! in the `type` field of an action.

use serde::{Serialize, Serializer};
use std::fmt;

/// Module names are plain strings, unique per [`crate::Registry`]
pub type ModuleName = String;

/// Separator between local name and module name in the wire tag
pub const SEPARATOR: char = '-';

/// Globally unique identifier of an action across all modules of a registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId {
    action: String,
    module: ModuleName,
}

/// Derive the qualified id for `local_name` declared in `module_name`
pub fn qualify(module_name: &str, local_name: &str) -> ActionId {
    ActionId {
        action: local_name.to_string(),
        module: module_name.to_string(),
    }
}

impl ActionId {
    /// Local (module scoped) action name
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Name of the owning module
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Flat string form used as the `type` of an action on the wire
    pub fn wire_tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.action, SEPARATOR, self.module)
    }
}

impl Serialize for ActionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
