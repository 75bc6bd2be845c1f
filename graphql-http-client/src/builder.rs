//! Client builder for the GraphQL client.
//!
//! Provides a fluent API for configuring and building a [`GraphqlClient`].

use std::sync::Arc;
use std::time::Duration;

use crate::ClientError;
use crate::client::GraphqlClient;
use crate::config::{HeaderMutator, MutatorChain, RequestMutator};
use crate::transport::{HyperTransport, Transport};

/// Builder for creating a [`GraphqlClient`].
///
/// # Example
///
/// ```ignore
/// use graphql_http_client::{ClientBuilder, HeaderMutator};
/// use std::time::Duration;
///
/// let client = ClientBuilder::new("https://api.example.com/graphql")
///     .with_mutator(HeaderMutator::bearer("token123"))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ClientBuilder {
    /// Endpoint URL, e.g. "https://api.example.com/graphql".
    endpoint: String,
    /// Custom transport; a default [`HyperTransport`] is built when unset.
    transport: Option<Arc<dyn Transport>>,
    /// Construction-time mutators.
    mutators: MutatorChain,
    /// Default timeout for calls.
    default_timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("endpoint", &self.endpoint)
            .field("transport", &self.transport.is_some())
            .field("mutator_count", &self.mutators.len())
            .field("default_timeout", &self.default_timeout)
            .finish()
    }
}

impl ClientBuilder {
    /// Create a new ClientBuilder for the given endpoint.
    ///
    /// The endpoint must be an absolute URI including scheme and host.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport: None,
            mutators: MutatorChain::new(),
            default_timeout: None,
        }
    }

    /// Use a specific transport instead of the default [`HyperTransport`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let transport = HyperTransport::builder()
    ///     .connect_timeout(Duration::from_secs(2))
    ///     .build()?;
    ///
    /// let client = ClientBuilder::new("http://localhost:4000/graphql")
    ///     .transport(transport)
    ///     .build()?;
    /// ```
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Add a mutator applied to every request.
    ///
    /// Mutators run in the order they are added, before any per-call mutator.
    pub fn with_mutator<M: RequestMutator + 'static>(mut self, mutator: M) -> Self {
        self.mutators.push(mutator);
        self
    }

    /// Add a header sent with every request.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is invalid.
    pub fn header(self, name: &str, value: &str) -> Self {
        self.with_mutator(HeaderMutator::new(name, value))
    }

    /// Set the default timeout for calls.
    ///
    /// Bounds sending the request and reading the response. A per-call
    /// [`CallOptions::timeout`](crate::CallOptions::timeout) takes precedence.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// Fails with [`ClientError::Request`] when no transport was supplied and
    /// the default one cannot be created (e.g. no TLS provider available).
    pub fn build(self) -> Result<GraphqlClient, ClientError> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HyperTransport::new()?),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            endpoint = %self.endpoint,
            mutators = self.mutators.len(),
            timeout = ?self.default_timeout,
            "graphql client built"
        );

        Ok(GraphqlClient::from_parts(
            transport,
            self.endpoint,
            self.mutators,
            self.default_timeout,
        ))
    }
}
