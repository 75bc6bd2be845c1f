//! Hyper-based HTTP transport.
//!
//! This module provides [`HyperTransport`], the default [`Transport`]
//! implementation, using hyper_util's legacy client.

use std::time::Duration;

use http_body_util::BodyExt;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::{TokioExecutor, TokioTimer};
use rustls::ClientConfig;

use super::body::TransportBody;
use super::connector::build_https_connector;
use super::{BoxFuture, ResponseBody, Transport};
use crate::ClientError;

/// Pooled client used for every GraphQL POST.
type HyperClient = Client<HttpsConnector<HttpConnector>, TransportBody>;

/// HTTP transport using hyper_util's legacy client.
///
/// Supports HTTP/1.1 and HTTP/2 over plain TCP or rustls TLS, with ALPN
/// negotiation for `https://` endpoints.
///
/// # Example
///
/// ```ignore
/// use graphql_http_client::{GraphqlClient, HyperTransport};
/// use std::time::Duration;
///
/// let transport = HyperTransport::builder()
///     .connect_timeout(Duration::from_secs(2))
///     .build()?;
///
/// let client = GraphqlClient::builder("https://api.example.com/graphql")
///     .transport(transport)
///     .build()?;
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    client: HyperClient,
    /// Prior-knowledge HTTP/2, no HTTP/1.1 fallback.
    http2_only: bool,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("http2_only", &self.http2_only)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Start configuring a transport.
    pub fn builder() -> HyperTransportBuilder {
        HyperTransportBuilder::new()
    }

    /// A transport with the default TLS setup, no connect timeout, and
    /// HTTP/1.1 or HTTP/2 negotiated per connection.
    pub fn new() -> Result<Self, ClientError> {
        Self::builder().build()
    }

    /// Send one request. Connection and protocol failures become
    /// [`ClientError::Transport`]; any status code is returned as a response.
    pub async fn request(
        &self,
        request: http::Request<TransportBody>,
    ) -> Result<http::Response<ResponseBody>, ClientError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| ClientError::Transport(format!("request failed: {}", e)))?;

        Ok(response.map(|body| {
            body.map_err(|e| ClientError::Transport(format!("failed to read response body: {}", e)))
                .boxed_unsync()
        }))
    }

    pub fn is_http2_only(&self) -> bool {
        self.http2_only
    }
}

impl Transport for HyperTransport {
    fn send(
        &self,
        request: http::Request<TransportBody>,
    ) -> BoxFuture<'_, Result<http::Response<ResponseBody>, ClientError>> {
        Box::pin(self.request(request))
    }
}

/// Builder for [`HyperTransport`].
///
/// # Example
///
/// ```ignore
/// use graphql_http_client::HyperTransportBuilder;
/// use std::time::Duration;
///
/// let transport = HyperTransportBuilder::new()
///     .http2_only(true)
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct HyperTransportBuilder {
    /// Overrides the feature-selected TLS setup.
    tls_config: Option<ClientConfig>,
    http2_only: bool,
    /// TCP connect timeout.
    connect_timeout: Option<Duration>,
}

impl Default for HyperTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HyperTransportBuilder {
    pub fn new() -> Self {
        Self {
            tls_config: None,
            http2_only: false,
            connect_timeout: None,
        }
    }

    /// Set a custom TLS configuration.
    ///
    /// Use this to configure custom root certificates, client certificates for
    /// mTLS, or other TLS settings.
    pub fn tls_config(mut self, config: ClientConfig) -> Self {
        self.tls_config = Some(config);
        self
    }

    /// Enable HTTP/2 only mode.
    ///
    /// When enabled, the transport speaks HTTP/2 directly without the
    /// HTTP/1.1 upgrade handshake (h2c for `http://` endpoints).
    pub fn http2_only(mut self, enabled: bool) -> Self {
        self.http2_only = enabled;
        self
    }

    /// Set the TCP connect timeout.
    ///
    /// This only bounds establishing the connection. Use
    /// [`ClientBuilder::timeout`](crate::ClientBuilder::timeout) or
    /// [`CallOptions::timeout`](crate::CallOptions::timeout) to bound a whole call.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the transport.
    ///
    /// Fails with [`ClientError::Request`] when no TLS configuration can be
    /// produced from the enabled features.
    pub fn build(self) -> Result<HyperTransport, ClientError> {
        let https_connector = build_https_connector(self.tls_config, self.connect_timeout)?;

        let mut builder = Client::builder(TokioExecutor::new());
        builder.pool_timer(TokioTimer::new());
        if self.http2_only {
            builder.http2_only(true);
        }

        Ok(HyperTransport {
            client: builder.build(https_connector),
            http2_only: self.http2_only,
        })
    }
}

impl std::fmt::Debug for HyperTransportBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransportBuilder")
            .field("tls_config", &self.tls_config.is_some())
            .field("http2_only", &self.http2_only)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = HyperTransportBuilder::new();
        assert!(!builder.http2_only);
        assert!(builder.tls_config.is_none());
        assert!(builder.connect_timeout.is_none());
    }

    #[test]
    fn test_builder_http2_only() {
        let builder = HyperTransportBuilder::new().http2_only(true);
        assert!(builder.http2_only);
    }

    #[test]
    fn test_builder_connect_timeout() {
        let builder = HyperTransportBuilder::new().connect_timeout(Duration::from_secs(3));
        assert_eq!(builder.connect_timeout, Some(Duration::from_secs(3)));
    }

    #[cfg(feature = "tls")]
    #[tokio::test]
    async fn test_build_transport() {
        let transport = HyperTransportBuilder::new().build().unwrap();
        assert!(!transport.is_http2_only());
    }

    #[cfg(feature = "tls")]
    #[tokio::test]
    async fn test_build_transport_http2_only() {
        let transport = HyperTransportBuilder::new().http2_only(true).build().unwrap();
        assert!(transport.is_http2_only());
    }
}
