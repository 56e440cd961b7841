//! Provenance API client module.

use super::base::{unsupported, ResourceClient};
use super::connection::Connection;
use crate::auth::TokenProvider;
use crate::config::ReprovConfig;
use crate::errors::{ConnectError, ReprovError};
use crate::requests::Request;
use crate::types::ExecutionId;
use camino::Utf8Path;

const SEGMENT: &str = "provenance";

/// Default destination of [ProvenanceClient::draw].
pub const DEFAULT_DIAGRAM_PATH: &str = "prov.png";

/// A client for the provenance API.
///
/// Provenance is derived from executions, so the CRUD operations of
/// [ResourceClient] are all unsupported.
#[derive(Debug, Clone)]
pub struct ProvenanceClient {
    conn: Connection,
}

impl ProvenanceClient {
    pub fn new(config: &ReprovConfig, tokens: &impl TokenProvider) -> Result<Self, ConnectError> {
        Connection::new(config, SEGMENT, tokens).map(|conn| Self { conn })
    }

    /// Get the provenance graph of an execution.
    pub fn capture(&self, id: ExecutionId) -> Result<serde_json::Value, ReprovError> {
        self.conn
            .execute(Request::get(self.conn.url(format!("capture/{}", id))))
    }

    /// Save a diagram of an execution's provenance to `prov.png`.
    pub fn draw(&self, id: ExecutionId) -> Result<u64, ReprovError> {
        self.draw_to(id, Utf8Path::new(DEFAULT_DIAGRAM_PATH))
    }

    /// Save a diagram of an execution's provenance to `dst`.
    pub fn draw_to(&self, id: ExecutionId, dst: &Utf8Path) -> Result<u64, ReprovError> {
        self.conn.download(&self.conn.url(format!("draw/{}", id)), dst)
    }
}

impl ResourceClient for ProvenanceClient {
    type Id = ExecutionId;
    type NewItem = ();
    type Changes = ();
    type Target = ExecutionId;

    fn connection(&self) -> &Connection {
        &self.conn
    }

    fn list(&self) -> Result<serde_json::Value, ReprovError> {
        unsupported(SEGMENT, "list")
    }

    fn get(&self, _id: ExecutionId) -> Result<serde_json::Value, ReprovError> {
        unsupported(SEGMENT, "get")
    }

    fn create(&self, _item: ()) -> Result<serde_json::Value, ReprovError> {
        unsupported(SEGMENT, "create")
    }

    fn update(
        &self,
        _id: ExecutionId,
        _changes: (),
    ) -> Result<Option<serde_json::Value>, ReprovError> {
        unsupported(SEGMENT, "update")
    }

    fn delete(&self, _id: ExecutionId) -> Result<serde_json::Value, ReprovError> {
        unsupported(SEGMENT, "delete")
    }
}
