use crate::auth::{token2header, TokenProvider};
use crate::config::ReprovConfig;
use crate::errors::{check, ConnectError, ReprovError};
use crate::requests::{multipart_form, Payload, Request};
use crate::types::ResourceUrl;
use camino::Utf8Path;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;

/// An authenticated HTTP client for one resource collection of the ReProv API.
#[derive(Debug, Clone)]
pub struct Connection {
    client: reqwest::blocking::Client,
    base_url: ResourceUrl,
}

impl Connection {
    /// Resolve the URL of the resource collection `segment` and obtain a token.
    pub fn new(
        config: &ReprovConfig,
        segment: &str,
        tokens: &impl TokenProvider,
    ) -> Result<Self, ConnectError> {
        let token = tokens.access_token().map_err(ConnectError::Token)?;
        let client = reqwest::blocking::ClientBuilder::new()
            .default_headers(token2header(&token)?)
            .build()?;
        Ok(Self {
            client,
            base_url: config.service_url.resource(segment),
        })
    }

    /// Get the URL of this resource collection.
    pub fn base_url(&self) -> &ResourceUrl {
        &self.base_url
    }

    /// Get the URL of `path` under this resource collection.
    pub fn url(&self, path: impl std::fmt::Display) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request and decode its JSON response.
    ///
    /// Every failure is logged before it is returned.
    pub fn execute<T: DeserializeOwned>(&self, req: Request) -> Result<T, ReprovError> {
        let url = req.url.clone();
        let result = self.send(req).and_then(|res| decode(&url, res));
        if let Err(e) = &result {
            log_failure(e);
        }
        result
    }

    fn send(&self, req: Request) -> Result<reqwest::blocking::Response, ReprovError> {
        log::debug!("{} {}", req.method, req.url);
        let builder = self.client.request(req.method, &req.url);
        let builder = if req.query.is_empty() {
            builder
        } else {
            builder.query(&req.query)
        };
        let builder = match req.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Multipart(files) => builder.multipart(multipart_form(&files)?),
        };
        let res = builder.send()?;
        check(res)
    }

    /// Download the response body of a GET request to `dst`, overwriting it.
    ///
    /// If the API responds with JSON instead, it is an error message:
    /// it gets logged and nothing is written. The body is written to a temporary
    /// file next to `dst` which replaces `dst` only once the whole body has been
    /// received, so a failed download leaves `dst` as it was.
    /// Returns the number of bytes written.
    pub fn download(&self, url: &str, dst: &Utf8Path) -> Result<u64, ReprovError> {
        let result = self.try_download(url, dst);
        if let Err(e) = &result {
            log_failure(e);
        }
        result
    }

    fn try_download(&self, url: &str, dst: &Utf8Path) -> Result<u64, ReprovError> {
        log::debug!("GET {} -> {}", url, dst);
        let res = self.client.get(url).send()?;
        if is_json(&res) {
            let payload: serde_json::Value = decode(url, res)?;
            log::error!("Error: {}", payload);
            return Err(ReprovError::ErrorPayload(payload));
        }
        let mut res = check(res)?;
        let dir = dst
            .parent()
            .filter(|p| !p.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let mut part = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| ReprovError::IO(with_path(e, dir)))?;
        let written = res.copy_to(&mut part)?;
        part.persist(dst).map_err(|e| ReprovError::IO(with_path(e.error, dst)))?;
        Ok(written)
    }
}

/// Name the path in an I/O error, like [fs_err] does.
fn with_path(e: std::io::Error, path: &Utf8Path) -> std::io::Error {
    std::io::Error::new(e.kind(), format!("{} in {}", e, path))
}

fn is_json(res: &reqwest::blocking::Response) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false)
}

fn decode<T: DeserializeOwned>(
    url: &str,
    res: reqwest::blocking::Response,
) -> Result<T, ReprovError> {
    let body = res.bytes()?;
    serde_json::from_slice(&body).map_err(|source| ReprovError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Status errors and error payloads are logged where they are detected.
fn log_failure(e: &ReprovError) {
    match e {
        ReprovError::Status { .. } | ReprovError::ErrorPayload(_) => {}
        other => log::error!("An error occurred: {}", other),
    }
}
