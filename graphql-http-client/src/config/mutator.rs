//! Request mutators for the GraphQL client.
//!
//! Mutators adjust an outgoing request before it is sent, for example to:
//! - Add authentication headers
//! - Propagate tracing or request IDs
//! - Attach request extensions for a custom transport
//!
//! A mutator sees the request [`Parts`] (method, URI, version, headers,
//! extensions) but never the body.
//!
//! # Example
//!
//! ```ignore
//! use graphql_http_client::{GraphqlClient, HeaderMutator, Mutator};
//! use http::request::Parts;
//!
//! let auth = HeaderMutator::bearer("token123");
//!
//! let logging = Mutator::new(|parts: &mut Parts| {
//!     println!("posting to {}", parts.uri);
//! });
//!
//! let client = GraphqlClient::builder("http://localhost:4000/graphql")
//!     .with_mutator(auth)
//!     .with_mutator(logging)
//!     .build()?;
//! ```

use std::sync::Arc;

use http::request::Parts;
use http::{HeaderName, HeaderValue};

use crate::ClientError;

// ============================================================================
// RequestMutator Trait
// ============================================================================

/// Trait for adjusting an outgoing request.
pub trait RequestMutator: Send + Sync {
    /// Called once per request, before the request is dispatched.
    fn mutate(&self, parts: &mut Parts);
}

// ============================================================================
// Mutator Chain
// ============================================================================

/// An ordered list of mutators, applied in registration order.
#[derive(Clone, Default)]
pub struct MutatorChain {
    mutators: Vec<Arc<dyn RequestMutator>>,
}

impl MutatorChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mutator to the end of the chain.
    pub fn push<M: RequestMutator + 'static>(&mut self, mutator: M) {
        self.mutators.push(Arc::new(mutator));
    }

    pub fn len(&self) -> usize {
        self.mutators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutators.is_empty()
    }

    /// Apply every mutator in order.
    pub fn apply(&self, parts: &mut Parts) {
        for mutator in &self.mutators {
            mutator.mutate(parts);
        }
    }
}

impl std::fmt::Debug for MutatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutatorChain")
            .field("len", &self.mutators.len())
            .finish()
    }
}

impl<M: RequestMutator + 'static> FromIterator<M> for MutatorChain {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        let mut chain = MutatorChain::new();
        for mutator in iter {
            chain.push(mutator);
        }
        chain
    }
}

// ============================================================================
// Header Mutator
// ============================================================================

/// A mutator that sets one header, replacing any previous value.
///
/// # Example
///
/// ```ignore
/// use graphql_http_client::HeaderMutator;
///
/// let tenant = HeaderMutator::new("x-tenant-id", "acme");
/// ```
#[derive(Clone, Debug)]
pub struct HeaderMutator {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderMutator {
    /// Create a new header mutator.
    ///
    /// # Panics
    ///
    /// Panics if the header name or value is invalid.
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.parse().expect("invalid header name"),
            value: value.parse().expect("invalid header value"),
        }
    }

    /// Try to create a new header mutator, returning an error if invalid.
    pub fn try_new(name: &str, value: &str) -> Result<Self, ClientError> {
        let name = name
            .parse()
            .map_err(|_| ClientError::Request(format!("invalid header name: {}", name)))?;
        let value = value
            .parse()
            .map_err(|_| ClientError::Request(format!("invalid header value: {}", value)))?;
        Ok(Self { name, value })
    }

    /// Create a new header mutator from pre-parsed values.
    pub fn from_parts(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }

    /// An `Authorization: Bearer <token>` mutator. The value is marked sensitive.
    ///
    /// # Panics
    ///
    /// Panics if the token contains characters not allowed in a header value.
    pub fn bearer(token: &str) -> Self {
        let mut value: HeaderValue = format!("Bearer {}", token)
            .parse()
            .expect("invalid bearer token");
        value.set_sensitive(true);
        Self {
            name: http::header::AUTHORIZATION,
            value,
        }
    }
}

impl RequestMutator for HeaderMutator {
    fn mutate(&self, parts: &mut Parts) {
        parts.headers.insert(self.name.clone(), self.value.clone());
    }
}

// ============================================================================
// Closure Mutator
// ============================================================================

/// A wrapper that adapts a closure to the [`RequestMutator`] trait.
///
/// # Example
///
/// ```ignore
/// use graphql_http_client::Mutator;
/// use http::request::Parts;
///
/// let request_id = Mutator::new(|parts: &mut Parts| {
///     parts.headers.insert("x-request-id", "abc-123".parse().unwrap());
/// });
/// ```
pub struct Mutator<F> {
    mutate: F,
}

impl<F> Mutator<F>
where
    F: Fn(&mut Parts) + Send + Sync,
{
    /// Create a new mutator from a closure.
    pub fn new(mutate: F) -> Self {
        Self { mutate }
    }
}

impl<F> Clone for Mutator<F>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            mutate: self.mutate.clone(),
        }
    }
}

impl<F> std::fmt::Debug for Mutator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mutator").finish()
    }
}

impl<F> RequestMutator for Mutator<F>
where
    F: Fn(&mut Parts) + Send + Sync,
{
    fn mutate(&self, parts: &mut Parts) {
        (self.mutate)(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn empty_parts() -> Parts {
        http::Request::new(()).into_parts().0
    }

    #[test]
    fn test_header_mutator() {
        let mutator = HeaderMutator::new("x-custom-header", "test-value");
        let mut parts = empty_parts();

        mutator.mutate(&mut parts);

        assert_eq!(parts.headers.get("x-custom-header").unwrap(), "test-value");
    }

    #[test]
    fn test_header_mutator_replaces_value() {
        let mut parts = empty_parts();
        parts.headers.insert("x-env", "old".parse().unwrap());

        HeaderMutator::new("x-env", "new").mutate(&mut parts);

        assert_eq!(parts.headers.get_all("x-env").iter().count(), 1);
        assert_eq!(parts.headers.get("x-env").unwrap(), "new");
    }

    #[test]
    fn test_header_mutator_try_new_invalid() {
        let err = HeaderMutator::try_new("invalid\0name", "value").unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));

        let err = HeaderMutator::try_new("x-ok", "bad\nvalue").unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[test]
    fn test_bearer_mutator() {
        let mut parts = empty_parts();
        HeaderMutator::bearer("secret").mutate(&mut parts);

        let value = parts.headers.get(http::header::AUTHORIZATION).unwrap();
        assert_eq!(value, "Bearer secret");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_closure_mutator() {
        let mutator = Mutator::new(|parts: &mut Parts| {
            parts.headers.insert("x-custom", "value".parse().unwrap());
        });

        let mut parts = empty_parts();
        mutator.mutate(&mut parts);

        assert_eq!(parts.headers.get("x-custom").unwrap(), "value");
    }

    #[test]
    fn test_chain_applies_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = MutatorChain::new();
        for label in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            chain.push(Mutator::new(move |_: &mut Parts| {
                seen.lock().unwrap().push(label);
            }));
        }

        chain.apply(&mut empty_parts());

        assert_eq!(chain.len(), 3);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_chain_later_mutator_wins() {
        let chain: MutatorChain = [
            HeaderMutator::new("x-value", "1"),
            HeaderMutator::new("x-value", "2"),
        ]
        .into_iter()
        .collect();

        let mut parts = empty_parts();
        chain.apply(&mut parts);

        assert_eq!(parts.headers.get("x-value").unwrap(), "2");
    }

    #[test]
    fn test_empty_chain_noop() {
        let chain = MutatorChain::new();
        let mut parts = empty_parts();
        chain.apply(&mut parts);
        assert!(chain.is_empty());
        assert!(parts.headers.is_empty());
    }
}
