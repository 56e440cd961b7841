//! Defines models for requests sent to the ReProv API.
use camino::{Utf8Path, Utf8PathBuf};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::Method;
use serde::ser::Error;
use serde::Serialize;

/// Fields of a workflow registry entry which are sent as query parameters
/// (multipart uploads) or as a JSON body (updates without files).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl WorkflowParams {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.version.is_none()
    }
}

/// A local file to upload as one part of a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name, e.g. `spec_file`
    pub field: &'static str,
    pub path: Utf8PathBuf,
}

impl FilePart {
    pub fn new(field: &'static str, path: impl AsRef<Utf8Path>) -> Self {
        Self {
            field,
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// What goes in the body of a request. A request carries files or JSON, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FilePart>),
}

/// Description of a single request to the ReProv API.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub payload: Payload,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Append query parameters from a flat [Serialize] struct or map, or from a
    /// sequence of `(key, value)` pairs. Anything else is an error.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(query)? {
            serde_json::Value::Object(map) => {
                for (k, v) in map {
                    self.query.push((k, query_value(v)));
                }
            }
            serde_json::Value::Array(pairs) => {
                for pair in pairs {
                    let (k, v) = match pair {
                        serde_json::Value::Array(kv) if kv.len() == 2 => {
                            let mut kv = kv.into_iter();
                            (kv.next(), kv.next())
                        }
                        other => {
                            return Err(Error::custom(format!("not a query pair: {}", other)))
                        }
                    };
                    match (k, v) {
                        (Some(serde_json::Value::String(k)), Some(v)) => {
                            self.query.push((k, query_value(v)))
                        }
                        (k, _) => {
                            return Err(Error::custom(format!(
                                "query key must be a string: {:?}",
                                k
                            )))
                        }
                    }
                }
            }
            other => return Err(Error::custom(format!("not a query: {}", other))),
        }
        Ok(self)
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, serde_json::Error> {
        self.payload = Payload::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn files(mut self, files: Vec<FilePart>) -> Self {
        self.payload = Payload::Multipart(files);
        self
    }
}

fn query_value(v: serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Open every file and assemble a multipart form.
///
/// The form owns the open files, so they are closed when the form is dropped.
pub(crate) fn multipart_form(files: &[FilePart]) -> Result<Form, std::io::Error> {
    let mut form = Form::new();
    for file in files {
        let filename = file
            .path
            .file_name()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("\"{}\" is an invalid file path", file.path),
                )
            })?
            .to_string();
        let reader = fs_err::File::open(&file.path)?;
        let length = reader.metadata()?.len();
        let part = Part::reader_with_length(reader, length)
            .file_name(filename)
            .mime_str("application/octet-stream")
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        form = form.part(file.field, part);
    }
    Ok(form)
}
