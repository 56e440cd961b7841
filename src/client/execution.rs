//! Workflow execution API client module.

use super::base::{unsupported, ResourceClient};
use super::connection::Connection;
use crate::auth::TokenProvider;
use crate::config::ReprovConfig;
use crate::errors::{ConnectError, ReprovError};
use crate::requests::Request;
use crate::types::{ExecutionId, ReanaName, RegistryId};
use camino::Utf8Path;
use reqwest::Method;
use serde::Serialize;

const SEGMENT: &str = "workflow_execution";

/// Default destination of [WorkflowExecutionClient::download_outputs].
pub const DEFAULT_OUTPUTS_PATH: &str = "outputs.zip";
/// Default destination of [WorkflowExecutionClient::download_inputs].
pub const DEFAULT_INPUTS_PATH: &str = "inputs.zip";

/// Which execution(s) to delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExecutionTarget {
    /// Executions of a registered workflow.
    #[serde(rename = "registry_id")]
    ByRegistryId(RegistryId),
    /// The execution known to REANA by this name.
    #[serde(rename = "reana_name")]
    ByReanaName(ReanaName),
}

impl From<RegistryId> for ExecutionTarget {
    fn from(id: RegistryId) -> Self {
        Self::ByRegistryId(id)
    }
}

impl From<ReanaName> for ExecutionTarget {
    fn from(name: ReanaName) -> Self {
        Self::ByReanaName(name)
    }
}

impl TryFrom<&serde_json::Value> for ExecutionTarget {
    type Error = ReprovError;

    /// Accepts a registry ID, or an object with a `reana_name`,
    /// such as an execution returned by [WorkflowExecutionClient::get].
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let Some(id) = value.as_u64() {
            return u32::try_from(id)
                .map(|id| Self::ByRegistryId(RegistryId(id)))
                .map_err(|_| ReprovError::InvalidInput(format!("registry ID {} is too large", id)));
        }
        value
            .get("reana_name")
            .and_then(|n| n.as_str())
            .map(|n| Self::ByReanaName(ReanaName::from(n)))
            .ok_or_else(|| {
                ReprovError::InvalidInput(
                    "execution must be a registry ID or have a reana_name".to_string(),
                )
            })
    }
}

impl ExecutionTarget {
    fn validate(&self) -> Result<(), ReprovError> {
        match self {
            Self::ByReanaName(name) if name.as_str().trim().is_empty() => Err(
                ReprovError::InvalidInput("reana_name must not be empty".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// A client for the workflow execution API.
#[derive(Debug, Clone)]
pub struct WorkflowExecutionClient {
    conn: Connection,
}

impl WorkflowExecutionClient {
    pub fn new(config: &ReprovConfig, tokens: &impl TokenProvider) -> Result<Self, ConnectError> {
        Connection::new(config, SEGMENT, tokens).map(|conn| Self { conn })
    }

    /// Download the outputs archive of an execution, by default to `outputs.zip`.
    pub fn download_outputs(
        &self,
        id: ExecutionId,
        dst: Option<&Utf8Path>,
    ) -> Result<u64, ReprovError> {
        let dst = dst.unwrap_or(Utf8Path::new(DEFAULT_OUTPUTS_PATH));
        self.conn.download(&self.conn.url(format!("outputs/{}", id)), dst)
    }

    /// Download the inputs archive of an execution, by default to `inputs.zip`.
    pub fn download_inputs(
        &self,
        id: ExecutionId,
        dst: Option<&Utf8Path>,
    ) -> Result<u64, ReprovError> {
        let dst = dst.unwrap_or(Utf8Path::new(DEFAULT_INPUTS_PATH));
        self.conn.download(&self.conn.url(format!("inputs/{}", id)), dst)
    }
}

impl ResourceClient for WorkflowExecutionClient {
    type Id = ExecutionId;
    type NewItem = RegistryId;
    type Changes = ();
    type Target = ExecutionTarget;

    fn connection(&self) -> &Connection {
        &self.conn
    }

    fn list(&self) -> Result<serde_json::Value, ReprovError> {
        self.conn.execute(Request::get(self.conn.url("")))
    }

    fn get(&self, id: ExecutionId) -> Result<serde_json::Value, ReprovError> {
        self.conn.execute(Request::get(self.conn.url(id)))
    }

    /// Execute a registered workflow.
    fn create(&self, registry_id: RegistryId) -> Result<serde_json::Value, ReprovError> {
        let req = Request::new(Method::POST, self.conn.url(format!("execute/{}", registry_id)));
        self.conn.execute(req)
    }

    fn update(
        &self,
        _id: ExecutionId,
        _changes: (),
    ) -> Result<Option<serde_json::Value>, ReprovError> {
        unsupported(SEGMENT, "update")
    }

    fn delete(&self, target: ExecutionTarget) -> Result<serde_json::Value, ReprovError> {
        if let Err(e) = target.validate() {
            log::error!("{}", e);
            return Err(e);
        }
        let req = Request::new(Method::DELETE, self.conn.url("delete/"))
            .query(&target)?;
        self.conn.execute(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use serde_json::json;

    #[rstest]
    #[case(json!(7), ExecutionTarget::ByRegistryId(RegistryId(7)))]
    #[case(json!({"id": 3, "reana_name": "reprov-3"}), ExecutionTarget::ByReanaName(ReanaName::from_static("reprov-3")))]
    fn test_target_from_value(#[case] value: serde_json::Value, #[case] expected: ExecutionTarget) {
        assert_eq!(ExecutionTarget::try_from(&value).unwrap(), expected);
    }

    #[rstest]
    #[case(json!("7"))]
    #[case(json!(-1))]
    #[case(json!({"id": 3}))]
    #[case(json!({"reana_name": 3}))]
    #[case(json!(u64::MAX))]
    fn test_target_from_bad_value(#[case] value: serde_json::Value) {
        assert!(matches!(
            ExecutionTarget::try_from(&value),
            Err(ReprovError::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case(ExecutionTarget::ByRegistryId(RegistryId(5)), ("registry_id", "5"))]
    #[case(ExecutionTarget::ByReanaName(ReanaName::from_static("reprov-5")), ("reana_name", "reprov-5"))]
    fn test_target_query(#[case] target: ExecutionTarget, #[case] expected: (&str, &str)) {
        let req = Request::get("http://localhost/delete/").query(&target).unwrap();
        assert_eq!(
            req.query,
            vec![(expected.0.to_string(), expected.1.to_string())]
        );
    }

    #[test]
    fn test_empty_reana_name_is_invalid() {
        let target = ExecutionTarget::ByReanaName(ReanaName::from_static(" "));
        assert!(matches!(target.validate(), Err(ReprovError::InvalidInput(_))));
    }
}
