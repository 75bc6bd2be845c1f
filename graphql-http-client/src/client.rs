//! GraphQL client implementation.
//!
//! This module provides the main [`GraphqlClient`] type for posting
//! operations to a single endpoint.

use std::sync::Arc;
use std::time::Duration;

use graphql_http_core::{GraphqlRequest, Variables};
use serde::de::DeserializeOwned;
#[cfg(feature = "tracing")]
use tracing::Instrument;

use crate::ClientError;
use crate::builder::ClientBuilder;
use crate::config::{CallOptions, MutatorChain};
use crate::request::build_request;
use crate::response::interpret;
use crate::transport::{Transport, invoke};

/// GraphQL-over-HTTP client bound to one endpoint.
///
/// Cloning is cheap: the transport and the mutator chain are shared. All
/// configuration is fixed at construction, so one client can serve many
/// concurrent calls.
///
/// # Example
///
/// ```ignore
/// use graphql_http_client::{GraphqlClient, Variables};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Viewer {
///     viewer: User,
/// }
///
/// let client = GraphqlClient::builder("https://api.example.com/graphql")
///     .header("x-api-key", "secret")
///     .build()?;
///
/// let data: Viewer = client
///     .post("query { viewer { id name } }", Variables::new())
///     .await?;
/// ```
#[derive(Clone)]
pub struct GraphqlClient {
    transport: Arc<dyn Transport>,
    endpoint: String,
    /// Construction-time mutators, applied before per-call ones.
    mutators: MutatorChain,
    /// Default timeout for calls without their own.
    default_timeout: Option<Duration>,
}

impl std::fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("endpoint", &self.endpoint)
            .field("mutators", &self.mutators)
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}

impl GraphqlClient {
    /// Create a client from a transport, an endpoint and construction-time
    /// mutators.
    ///
    /// The endpoint is validated on each call; a malformed one makes every
    /// call fail with [`ClientError::Request`].
    pub fn new(
        transport: impl Transport + 'static,
        endpoint: impl Into<String>,
        mutators: MutatorChain,
    ) -> Self {
        Self::from_parts(Arc::new(transport), endpoint.into(), mutators, None)
    }

    /// Create a new [`ClientBuilder`] for `endpoint`.
    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    pub(crate) fn from_parts(
        transport: Arc<dyn Transport>,
        endpoint: String,
        mutators: MutatorChain,
        default_timeout: Option<Duration>,
    ) -> Self {
        Self {
            transport,
            endpoint,
            mutators,
            default_timeout,
        }
    }

    /// The endpoint every call is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The default per-call timeout, if any.
    pub fn default_timeout(&self) -> Option<Duration> {
        self.default_timeout
    }

    /// Post an operation and decode `data` into `T`.
    ///
    /// Null entries in `variables` are removed before sending.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Encode`] if the request cannot be serialized
    /// - [`ClientError::Request`] if the endpoint is not an absolute URI
    /// - [`ClientError::Transport`] if the server cannot be reached, the body
    ///   cannot be read, or the timeout expires
    /// - [`ClientError::Decode`] if a 2xx response is not a valid envelope for `T`
    /// - [`ClientError::Response`] for a non-2xx status and/or GraphQL errors
    pub async fn post<T>(
        &self,
        query: impl Into<String>,
        variables: Variables,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.post_with_options(query, variables, CallOptions::default())
            .await
    }

    /// Post an operation with per-call options.
    ///
    /// The same as [`post`](Self::post) but allows an operation name, a
    /// timeout override and extra mutators.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use graphql_http_client::CallOptions;
    /// use std::time::Duration;
    ///
    /// let options = CallOptions::new()
    ///     .operation_name("Viewer")
    ///     .timeout(Duration::from_secs(2));
    ///
    /// let data: Viewer = client
    ///     .post_with_options("query Viewer { viewer { id } }", Variables::new(), options)
    ///     .await?;
    /// ```
    pub async fn post_with_options<T>(
        &self,
        query: impl Into<String>,
        variables: Variables,
        options: CallOptions,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let request = GraphqlRequest::new(query, variables)
            .with_operation_name(options.operation_name.as_str());

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "graphql.post",
            endpoint = %self.endpoint,
            operation = %request.operation_name(),
            otel.kind = "client",
        );

        let call = self.execute::<T>(request, options);

        #[cfg(feature = "tracing")]
        let call = call.instrument(span);

        call.await
    }

    async fn execute<T>(
        &self,
        request: GraphqlRequest,
        options: CallOptions,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let http_request =
            build_request(&self.endpoint, &request, &self.mutators, &options.mutators)?;
        let timeout = options.timeout.or(self.default_timeout);
        let raw = invoke(self.transport.as_ref(), http_request, timeout).await?;
        interpret(&raw)
    }
}
