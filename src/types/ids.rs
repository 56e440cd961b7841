use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;
use std::fmt::{Display, Formatter};

/// Workflow registry ID
#[derive(Copy, Clone, Shrinkwrap, Serialize, Deserialize, Debug, Hash, Eq, PartialEq)]
pub struct RegistryId(pub u32);

/// Workflow execution ID
#[derive(Copy, Clone, Shrinkwrap, Serialize, Deserialize, Debug, Hash, Eq, PartialEq)]
pub struct ExecutionId(pub u32);

impl Display for RegistryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Display for ExecutionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for RegistryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for ExecutionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
