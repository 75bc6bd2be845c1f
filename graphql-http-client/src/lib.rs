//! GraphQL-over-HTTP client for Rust.
//!
//! This crate posts GraphQL operations to a single endpoint and turns the
//! answer into a `Result`, reconciling HTTP status and the protocol-level
//! `errors` field into one [`ErrorResponse`].
//!
//! ## Features
//!
//! - JSON POST of `{query, variables, operationName}`, with null variables removed
//! - Construction-time and per-call request mutators (headers, auth, extensions)
//! - Per-client and per-call timeouts
//! - Network errors and GraphQL errors reported together when both occur
//! - Pluggable [`Transport`]; the default is hyper + rustls
//!
//! ## Example
//!
//! ```ignore
//! use graphql_http_client::{CallOptions, GraphqlClient, HeaderMutator, variables_from};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct UserVars<'a> {
//!     id: &'a str,
//!     after: Option<String>,
//! }
//!
//! #[derive(Deserialize)]
//! struct UserData {
//!     user: Option<User>,
//! }
//!
//! let client = GraphqlClient::builder("https://api.example.com/graphql")
//!     .with_mutator(HeaderMutator::bearer("token123"))
//!     .build()?;
//!
//! // `after: None` is dropped from the request
//! let variables = variables_from(&UserVars { id: "42", after: None })?;
//!
//! let options = CallOptions::new().operation_name("User");
//! match client
//!     .post_with_options::<UserData>(USER_QUERY, variables, options)
//!     .await
//! {
//!     Ok(data) => println!("{:?}", data.user),
//!     Err(err) => {
//!         if let Some(errors) = err.graphql_errors() {
//!             for error in errors {
//!                 eprintln!("graphql: {}", error);
//!             }
//!         }
//!         if let Some(network) = err.network_error() {
//!             eprintln!("http {}: {}", network.code, network.message);
//!         }
//!     }
//! }
//! ```
//!
//! ## Custom Transport
//!
//! ```ignore
//! use graphql_http_client::{GraphqlClient, HyperTransport, MutatorChain};
//! use std::time::Duration;
//!
//! let transport = HyperTransport::builder()
//!     .http2_only(true)
//!     .connect_timeout(Duration::from_secs(2))
//!     .build()?;
//!
//! let client = GraphqlClient::new(
//!     transport,
//!     "http://localhost:4000/graphql",
//!     MutatorChain::new(),
//! );
//! ```
//!
//! ## Tracing
//!
//! With the `tracing` feature (on by default) every call runs inside a
//! `graphql.post` span carrying the endpoint and operation name.

mod builder;
mod client;
pub mod config;
mod error;
mod request;
pub mod response;
pub mod transport;

pub use builder::ClientBuilder;
pub use client::GraphqlClient;
pub use error::{ClientError, ErrorResponse, NetworkError};

// Re-export config types
pub use config::{CallOptions, HeaderMutator, Mutator, MutatorChain, RequestMutator};

// Re-export response types
pub use response::{RawResponse, interpret};

// Re-export transport types
pub use transport::{
    HyperTransport, HyperTransportBuilder, TlsClientConfig, Transport, TransportBody, transport_fn,
};

// Re-export core types
pub use graphql_http_core::{
    GraphqlError, GraphqlErrorList, GraphqlRequest, Location, PathSegment, Variables,
    sanitize_variables, variables_from,
};
