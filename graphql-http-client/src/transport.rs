//! HTTP transport layer for the GraphQL client.
//!
//! This module provides:
//!
//! - [`Transport`]: the seam between the client and an HTTP stack
//! - [`HyperTransport`]: the default implementation over hyper_util + rustls
//! - [`transport_fn`]: adapts an async closure into a transport
//!
//! # Feature Flags
//!
//! TLS support requires enabling the appropriate features:
//!
//! - `tls` (default) - Enables `tls-ring` + `tls-native-roots` for convenience
//! - `tls-ring` / `tls-aws-lc` - Crypto providers
//! - `tls-native-roots` / `tls-webpki-roots` - Root certificates

mod body;
mod connector;
mod hyper;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderValue, Request, Response};
use http_body_util::BodyExt;
use http_body_util::combinators::UnsyncBoxBody;

use crate::ClientError;
use crate::response::RawResponse;

pub use body::TransportBody;
pub use connector::{build_https_connector, has_tls_support};

#[cfg(any(feature = "tls-native-roots", feature = "tls-webpki-roots"))]
pub use connector::default_tls_config;

pub use hyper::{HyperTransport, HyperTransportBuilder};

// Re-export rustls types that users might need for TLS configuration
pub use rustls::ClientConfig as TlsClientConfig;

/// Type alias for a boxed future returning a result.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Response body handed back by a [`Transport`].
pub type ResponseBody = UnsyncBoxBody<Bytes, ClientError>;

/// Media type sent in both `Content-Type` and `Accept`.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// An HTTP stack able to execute one request.
///
/// Failures to reach the server (connection refused, DNS, TLS, etc.) must be
/// reported as [`ClientError::Transport`]. Any HTTP status, including error
/// statuses, is a successful send.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: Request<TransportBody>,
    ) -> BoxFuture<'_, Result<Response<ResponseBody>, ClientError>>;
}

/// A [`Transport`] backed by an async closure.
///
/// Created with [`transport_fn`].
pub struct TransportFn<F> {
    send: F,
}

/// Adapt an async closure into a [`Transport`].
///
/// Useful for in-process tests or for plugging in a different HTTP stack.
///
/// # Example
///
/// ```ignore
/// use graphql_http_client::transport::{transport_fn, TransportBody};
/// use http_body_util::{BodyExt, Full};
///
/// let transport = transport_fn(|_req: http::Request<TransportBody>| async {
///     let body = Full::new(bytes::Bytes::from(r#"{"data":{"ok":true}}"#))
///         .map_err(|never| match never {})
///         .boxed_unsync();
///     Ok(http::Response::new(body))
/// });
/// ```
pub fn transport_fn<F, Fut>(send: F) -> TransportFn<F>
where
    F: Fn(Request<TransportBody>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<ResponseBody>, ClientError>> + Send + 'static,
{
    TransportFn { send }
}

impl<F, Fut> Transport for TransportFn<F>
where
    F: Fn(Request<TransportBody>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response<ResponseBody>, ClientError>> + Send + 'static,
{
    fn send(
        &self,
        request: Request<TransportBody>,
    ) -> BoxFuture<'_, Result<Response<ResponseBody>, ClientError>> {
        Box::pin((self.send)(request))
    }
}

impl<F> std::fmt::Debug for TransportFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportFn").finish_non_exhaustive()
    }
}

/// Send `request` and read the whole response.
///
/// Sets the JSON `Content-Type` and `Accept` headers, replacing whatever a
/// mutator put there. `timeout` bounds both the send and the body read. The
/// response body is dropped on every exit path.
pub(crate) async fn invoke(
    transport: &dyn Transport,
    mut request: Request<TransportBody>,
    timeout: Option<Duration>,
) -> Result<RawResponse, ClientError> {
    let headers = request.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

    let exchange = async move {
        let response = transport.send(request).await?;
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes();
        Ok::<_, ClientError>(RawResponse::new(status, body))
    };

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, exchange)
            .await
            .unwrap_or_else(|_| {
                Err(ClientError::Transport(format!(
                    "client timeout exceeded after {:?}",
                    limit
                )))
            }),
        None => exchange.await,
    };

    #[cfg(feature = "tracing")]
    match &result {
        Ok(raw) => tracing::debug!(
            status = raw.status().as_u16(),
            body_len = raw.body().len(),
            "graphql response received"
        ),
        Err(err) => tracing::warn!(error = %err, "graphql request failed"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use std::sync::{Arc, Mutex};

    fn body(data: &'static str) -> ResponseBody {
        Full::new(Bytes::from(data))
            .map_err(|never| match never {})
            .boxed_unsync()
    }

    #[tokio::test]
    async fn test_invoke_sets_json_headers() {
        let seen = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&seen);
        let transport = transport_fn(move |req: Request<TransportBody>| {
            *captured.lock().unwrap() = Some(req.headers().clone());
            async { Ok(Response::new(body("{}"))) }
        });

        let mut request = Request::new(TransportBody::full(Bytes::from("{}")));
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        invoke(&transport, request, None).await.unwrap();

        let headers = seen.lock().unwrap().take().unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), JSON_CONTENT_TYPE);
        assert_eq!(headers.get(ACCEPT).unwrap(), JSON_CONTENT_TYPE);
        assert_eq!(headers.get_all(CONTENT_TYPE).iter().count(), 1);
    }

    #[tokio::test]
    async fn test_invoke_collects_status_and_body() {
        let transport = transport_fn(|_req: Request<TransportBody>| async {
            let mut response = Response::new(body("Bad Gateway"));
            *response.status_mut() = http::StatusCode::BAD_GATEWAY;
            Ok(response)
        });

        let raw = invoke(&transport, Request::new(TransportBody::empty()), None)
            .await
            .unwrap();
        assert_eq!(raw.status(), http::StatusCode::BAD_GATEWAY);
        assert_eq!(raw.body().as_ref(), b"Bad Gateway");
    }

    #[tokio::test]
    async fn test_invoke_propagates_transport_error() {
        let transport = transport_fn(|_req: Request<TransportBody>| async {
            Err(ClientError::Transport("connection refused".into()))
        });

        let err = invoke(&transport, Request::new(TransportBody::empty()), None)
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_invoke_timeout() {
        let transport = transport_fn(|_req: Request<TransportBody>| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Response::new(body("{}")))
        });

        let err = invoke(
            &transport,
            Request::new(TransportBody::empty()),
            Some(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("timeout"));
    }
}
