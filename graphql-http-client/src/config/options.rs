//! Call options for per-request configuration.
//!
//! This module provides [`CallOptions`] for configuring individual GraphQL
//! calls with a timeout, an operation name and extra request mutators.

use std::time::Duration;

use super::mutator::{HeaderMutator, MutatorChain, RequestMutator};

/// Options for configuring an individual call.
///
/// Per-call mutators run after the client's construction-time mutators.
///
/// # Example
///
/// ```ignore
/// use graphql_http_client::CallOptions;
/// use std::time::Duration;
///
/// let options = CallOptions::new()
///     .timeout(Duration::from_secs(5))
///     .operation_name("Viewer")
///     .header("x-request-id", "abc-123");
///
/// let viewer: ViewerData = client
///     .post_with_options(VIEWER_QUERY, variables, options)
///     .await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Timeout for this specific call.
    /// If set, overrides the client's default timeout.
    pub(crate) timeout: Option<Duration>,
    /// `operationName` sent with the request; empty means "not sent".
    pub(crate) operation_name: String,
    /// Mutators for this specific call.
    pub(crate) mutators: MutatorChain,
}

impl CallOptions {
    /// Create new default call options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout for this call.
    ///
    /// The timeout covers sending the request and reading the whole response
    /// body. When it expires the call fails with a transport error.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the configured timeout, if any.
    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Set the `operationName` for this call.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = name.into();
        self
    }

    /// Add a mutator for this call.
    pub fn with_mutator<M: RequestMutator + 'static>(mut self, mutator: M) -> Self {
        self.mutators.push(mutator);
        self
    }

    /// Add a custom header for this call.
    ///
    /// `Content-Type` and `Accept` are always overwritten with the JSON media
    /// type before the request is sent.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is invalid.
    pub fn header(self, name: &str, value: &str) -> Self {
        self.with_mutator(HeaderMutator::new(name, value))
    }

    /// Try to add a custom header for this call.
    ///
    /// Returns `None` if the header name or value is invalid.
    pub fn try_header(self, name: &str, value: &str) -> Option<Self> {
        let mutator = HeaderMutator::try_new(name, value).ok()?;
        Some(self.with_mutator(mutator))
    }

    /// Get the per-call mutators.
    pub fn mutators(&self) -> &MutatorChain {
        &self.mutators
    }
}
