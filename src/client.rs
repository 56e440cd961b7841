pub(crate) mod base;
pub(crate) mod connection;
pub(crate) mod execution;
pub(crate) mod provenance;
pub(crate) mod registry;
