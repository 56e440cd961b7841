//! Access tokens for the ReProv API.
//!
//! How a token is obtained is up to the caller: implement [TokenProvider],
//! or use [StaticToken] for a fixed API key.

use crate::errors::ConnectError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

/// Something which can produce a bearer token.
///
/// Clients call [TokenProvider::access_token] exactly once, when they are constructed.
pub trait TokenProvider {
    fn access_token(&self) -> anyhow::Result<String>;
}

/// A token which never changes, e.g. an API key.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> anyhow::Result<String>,
{
    fn access_token(&self) -> anyhow::Result<String> {
        self()
    }
}

/// Default headers sent with every request.
pub(crate) fn token2header(token: &str) -> Result<HeaderMap, ConnectError> {
    let mut headers = HeaderMap::new();
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}
