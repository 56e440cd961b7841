//! Client library for the ReProv workflow registry, execution, and provenance API.
//!
//! ```no_run
//! use reprov::{ResourceClient, ReprovConfig, WorkflowExecutionClient};
//! use reprov::types::RegistryId;
//!
//! let config = ReprovConfig::from_env()?;
//! let token = config.token().expect("API_KEY is not set");
//! let executions = WorkflowExecutionClient::new(&config, &token)?;
//! let execution = executions.create(RegistryId(1))?;
//! println!("{}", execution);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[macro_use]
extern crate shrinkwraprs;

pub mod auth;
mod client;
mod config;
pub mod errors;
pub mod requests;
pub mod types;

pub use auth::{StaticToken, TokenProvider};
pub use client::base::ResourceClient;
pub use client::connection::Connection;
pub use client::execution::*;
pub use client::provenance::*;
pub use client::registry::*;
pub use config::*;
pub use errors::ReprovError;
pub use reqwest;
