//! Errors for this crate.

use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use std::fmt::{Display, Formatter};

#[derive(thiserror::Error, Debug)]
pub enum InvalidServiceUrl {
    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),

    #[error("Given URL must not contain a query string: {0}")]
    Query(String),
}

aliri_braid::from_infallible!(InvalidServiceUrl);

/// Errors which might occur while loading a [crate::ReprovConfig].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error(transparent)]
    Url(#[from] InvalidServiceUrl),
}

/// Errors which might occur while constructing a client.
#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    /// The token provider could not produce an access token.
    #[error("could not obtain access token: {0}")]
    Token(anyhow::Error),

    #[error("access token is not a valid header value")]
    Header(#[from] InvalidHeaderValue),

    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

/// Classification of an unsuccessful HTTP status code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StatusClass {
    BadRequest,
    Unauthorized,
    NotFound,
    ServerError,
    Unexpected(StatusCode),
}

impl From<StatusCode> for StatusClass {
    fn from(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => StatusClass::BadRequest,
            StatusCode::UNAUTHORIZED => StatusClass::Unauthorized,
            StatusCode::NOT_FOUND => StatusClass::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => StatusClass::ServerError,
            other => StatusClass::Unexpected(other),
        }
    }
}

impl Display for StatusClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusClass::BadRequest => f.write_str("Bad request. Please check your input data."),
            StatusClass::Unauthorized => {
                f.write_str("Unauthorized. Please check your credentials.")
            }
            StatusClass::NotFound => f.write_str("Resource not found. Please check the ID."),
            StatusClass::ServerError => {
                f.write_str("Internal server error. Please try again later.")
            }
            StatusClass::Unexpected(status) => write!(f, "Unexpected error: {}", status),
        }
    }
}

impl StatusClass {
    /// Classify `status` and log its diagnostic message.
    pub fn report(status: StatusCode) -> Self {
        let class = Self::from(status);
        log::error!("{}", class);
        class
    }
}

/// Errors representing failed interactions with the ReProv API.
#[derive(thiserror::Error, Debug)]
pub enum ReprovError {
    /// Error status from the API, with whatever explanation it gave.
    #[error("({status:?} {class}): {text}")]
    Status {
        status: StatusCode,
        class: StatusClass,
        text: String,
        source: reqwest::Error,
    },

    /// Failure to reach the API or to read its response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Successful response whose body is not the expected JSON.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The API sent a JSON message where a file was expected.
    #[error("API responded with an error: {0}")]
    ErrorPayload(serde_json::Value),

    /// Input rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Request parameters which could not be encoded.
    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),

    /// The resource API has no such operation.
    #[error("{operation} is not supported by the {resource} API")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },
}

impl ReprovError {
    /// Get the classification of this error's HTTP status, if it has one.
    pub fn class(&self) -> Option<StatusClass> {
        match self {
            ReprovError::Status { class, .. } => Some(*class),
            _ => None,
        }
    }
}

/// Pass through a successful response, or classify and log an unsuccessful one.
pub(crate) fn check(
    res: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ReprovError> {
    match res.error_for_status_ref() {
        Ok(_) => Ok(res),
        Err(source) => {
            log::debug!("API request failed: {}", source);
            let status = res.status();
            let class = StatusClass::report(status);
            let text = res.text().map_err(ReprovError::Transport)?;
            if !text.is_empty() {
                log::debug!("Server response: {}", text);
            }
            Err(ReprovError::Status {
                status,
                class,
                text,
                source,
            })
        }
    }
}
