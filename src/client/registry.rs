//! Workflow registry API client module.

use super::base::ResourceClient;
use super::connection::Connection;
use crate::auth::TokenProvider;
use crate::config::ReprovConfig;
use crate::errors::{ConnectError, ReprovError};
use crate::requests::{FilePart, Request, WorkflowParams};
use crate::types::RegistryId;
use camino::Utf8PathBuf;
use reqwest::Method;

const SEGMENT: &str = "workflow_registry";

/// A workflow to register: its name and version, a specification file,
/// and optionally an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkflow {
    pub params: WorkflowParams,
    pub spec_file: Utf8PathBuf,
    pub input_file: Option<Utf8PathBuf>,
}

impl NewWorkflow {
    pub fn new(params: WorkflowParams, spec_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            params,
            spec_file: spec_file.into(),
            input_file: None,
        }
    }

    pub fn with_input_file(self, input_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            input_file: Some(input_file.into()),
            ..self
        }
    }

    fn files(&self) -> Vec<FilePart> {
        let mut files = vec![FilePart::new("spec_file", &self.spec_file)];
        if let Some(input_file) = &self.input_file {
            files.push(FilePart::new("input_file", input_file));
        }
        files
    }
}

/// Changes to a registered workflow. Fields which are `None` are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowChanges {
    pub params: Option<WorkflowParams>,
    pub spec_file: Option<Utf8PathBuf>,
    pub input_file: Option<Utf8PathBuf>,
}

impl WorkflowChanges {
    fn params(&self) -> Option<&WorkflowParams> {
        self.params.as_ref().filter(|p| !p.is_empty())
    }

    fn files(&self) -> Vec<FilePart> {
        let spec = self.spec_file.iter().map(|p| FilePart::new("spec_file", p));
        let input = self.input_file.iter().map(|p| FilePart::new("input_file", p));
        spec.chain(input).collect()
    }

    /// Would applying these changes do nothing?
    pub fn is_empty(&self) -> bool {
        self.params().is_none() && self.spec_file.is_none() && self.input_file.is_none()
    }
}

/// A client for the workflow registry API.
#[derive(Debug, Clone)]
pub struct WorkflowRegistryClient {
    conn: Connection,
}

impl WorkflowRegistryClient {
    pub fn new(config: &ReprovConfig, tokens: &impl TokenProvider) -> Result<Self, ConnectError> {
        Connection::new(config, SEGMENT, tokens).map(|conn| Self { conn })
    }
}

impl ResourceClient for WorkflowRegistryClient {
    type Id = RegistryId;
    type NewItem = NewWorkflow;
    type Changes = WorkflowChanges;
    type Target = RegistryId;

    fn connection(&self) -> &Connection {
        &self.conn
    }

    fn list(&self) -> Result<serde_json::Value, ReprovError> {
        self.conn.execute(Request::get(self.conn.url("")))
    }

    fn get(&self, id: RegistryId) -> Result<serde_json::Value, ReprovError> {
        self.conn.execute(Request::get(self.conn.url(id)))
    }

    /// Register a workflow. The name and version are sent as query parameters
    /// alongside the uploaded files.
    fn create(&self, item: NewWorkflow) -> Result<serde_json::Value, ReprovError> {
        let req = Request::new(Method::POST, self.conn.url("register/"))
            .query(&item.params)?
            .files(item.files());
        self.conn.execute(req)
    }

    /// Update a registered workflow. With files, the request is a multipart
    /// upload with the params as query parameters. Without files, the params
    /// are sent as a JSON body.
    fn update(
        &self,
        id: RegistryId,
        changes: WorkflowChanges,
    ) -> Result<Option<serde_json::Value>, ReprovError> {
        if changes.is_empty() {
            log::warn!("No fields to update.");
            return Ok(None);
        }
        let params = changes.params().cloned().unwrap_or_default();
        let files = changes.files();
        let req = Request::new(Method::PUT, self.conn.url(format!("update/{}", id)));
        let req = if files.is_empty() {
            req.json(&params)?
        } else {
            req.query(&params)?.files(files)
        };
        self.conn.execute(req).map(Some)
    }

    fn delete(&self, id: RegistryId) -> Result<serde_json::Value, ReprovError> {
        let req = Request::new(Method::DELETE, self.conn.url(format!("delete/{}", id)));
        self.conn.execute(req)
    }
}
