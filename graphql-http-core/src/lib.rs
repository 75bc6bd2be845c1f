//! Core wire types for GraphQL over HTTP.
//!
//! This crate provides the transport-independent pieces used by
//! `graphql-http-client`:
//!
//! ## Modules
//!
//! - `variables`: Variable mappings and null stripping
//! - `request`: The outgoing `{query, variables, operationName}` payload
//! - `envelope`: Decoding of the `{data, errors}` response envelope
//! - `error`: Structured GraphQL errors and envelope decode errors

mod envelope;
mod error;
mod request;
mod variables;

pub use envelope::*;
pub use error::*;
pub use request::*;
pub use variables::*;
