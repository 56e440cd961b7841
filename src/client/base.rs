use super::connection::Connection;
use crate::errors::ReprovError;

/// Operations every ReProv resource client has.
///
/// A resource whose API does not support an operation returns
/// [ReprovError::Unsupported] without contacting the server.
pub trait ResourceClient {
    /// Identifies a single item of this resource.
    type Id;
    /// What is needed to create an item.
    type NewItem;
    /// What may be changed about an item.
    type Changes;
    /// What identifies an item to delete.
    type Target;

    /// Get the underlying connection.
    fn connection(&self) -> &Connection;

    /// List all items.
    fn list(&self) -> Result<serde_json::Value, ReprovError>;

    /// Get an item by ID.
    fn get(&self, id: Self::Id) -> Result<serde_json::Value, ReprovError>;

    /// Create an item.
    fn create(&self, item: Self::NewItem) -> Result<serde_json::Value, ReprovError>;

    /// Update an item. Produces `Ok(None)` if there was nothing to change.
    fn update(
        &self,
        id: Self::Id,
        changes: Self::Changes,
    ) -> Result<Option<serde_json::Value>, ReprovError>;

    /// Delete an item.
    fn delete(&self, target: Self::Target) -> Result<serde_json::Value, ReprovError>;
}

pub(crate) fn unsupported<T>(
    resource: &'static str,
    operation: &'static str,
) -> Result<T, ReprovError> {
    log::warn!("{} is not supported by the {} API", operation, resource);
    Err(ReprovError::Unsupported {
        resource,
        operation,
    })
}
