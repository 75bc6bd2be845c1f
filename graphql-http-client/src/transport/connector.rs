//! TLS connector setup for the hyper HTTP client.
//!
//! # Feature Flags
//!
//! TLS support requires both a crypto provider and root certificates:
//!
//! - **Crypto providers** (choose one):
//!   - `tls-ring` - Use ring crypto (default with `tls` feature)
//!   - `tls-aws-lc` - Use AWS LC crypto
//!
//! - **Root certificates** (choose one):
//!   - `tls-native-roots` - Use system root certificates (default with `tls` feature)
//!   - `tls-webpki-roots` - Use bundled Mozilla root certificates
//!
//! The `tls` feature enables `tls-ring` + `tls-native-roots` for convenience.
//! Plain `http://` endpoints work without any TLS feature as long as a TLS
//! config can be built or is supplied.

#[cfg(any(feature = "tls-ring", feature = "tls-aws-lc"))]
use std::sync::Arc;
use std::time::Duration;

use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use rustls::ClientConfig;

use crate::ClientError;

/// Check if TLS features are properly configured.
///
/// Returns true if both a crypto provider AND root certificates are available.
#[inline]
pub const fn has_tls_support() -> bool {
    cfg!(any(feature = "tls-ring", feature = "tls-aws-lc"))
        && cfg!(any(
            feature = "tls-native-roots",
            feature = "tls-webpki-roots"
        ))
}

/// Try to get a crypto provider ConfigBuilder.
///
/// Priority:
/// 1. Feature-gated provider (tls-ring or tls-aws-lc)
/// 2. User-installed global default provider
/// 3. None if no provider available
#[cfg(any(feature = "tls-native-roots", feature = "tls-webpki-roots"))]
fn try_get_crypto_provider_builder()
-> Option<rustls::ConfigBuilder<ClientConfig, rustls::WantsVerifier>> {
    #[cfg(feature = "tls-ring")]
    let provider = Some(Arc::new(rustls::crypto::ring::default_provider()));

    #[cfg(all(feature = "tls-aws-lc", not(feature = "tls-ring")))]
    let provider = Some(Arc::new(rustls::crypto::aws_lc_rs::default_provider()));

    #[cfg(not(any(feature = "tls-ring", feature = "tls-aws-lc")))]
    let provider = rustls::crypto::CryptoProvider::get_default().cloned();

    ClientConfig::builder_with_provider(provider?)
        .with_safe_default_protocol_versions()
        .ok()
}

/// Build the default TLS configuration.
///
/// Uses feature-gated root certificates (native or webpki) and either
/// a feature-gated crypto provider or a user-installed global default.
///
/// Returns `None` if no crypto provider is available.
#[cfg(any(feature = "tls-native-roots", feature = "tls-webpki-roots"))]
pub fn default_tls_config() -> Option<ClientConfig> {
    let builder = try_get_crypto_provider_builder()?;
    let roots = build_root_store();

    Some(builder.with_root_certificates(roots).with_no_client_auth())
}

/// Build the root certificate store from enabled features.
#[cfg(any(feature = "tls-native-roots", feature = "tls-webpki-roots"))]
fn build_root_store() -> rustls::RootCertStore {
    let mut roots = rustls::RootCertStore::empty();

    // prefer native over webpki if both enabled
    #[cfg(feature = "tls-native-roots")]
    {
        let native_certs = rustls_native_certs::load_native_certs();
        if !native_certs.errors.is_empty() {
            // some certs may still have loaded
            #[cfg(feature = "tracing")]
            tracing::debug!("errors loading native certs: {:?}", native_certs.errors);
        }
        roots.add_parsable_certificates(native_certs.certs);
    }

    #[cfg(all(feature = "tls-webpki-roots", not(feature = "tls-native-roots")))]
    {
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    roots
}

/// Resolve the TLS configuration to use: the supplied one, or the default.
fn resolve_tls_config(tls_config: Option<ClientConfig>) -> Result<ClientConfig, ClientError> {
    if let Some(config) = tls_config {
        return Ok(config);
    }

    #[cfg(any(feature = "tls-native-roots", feature = "tls-webpki-roots"))]
    {
        default_tls_config().ok_or_else(|| {
            ClientError::Request(
                "no TLS crypto provider: enable `tls-ring` or `tls-aws-lc`, \
                 or install a global provider via `CryptoProvider::install_default()`"
                    .to_string(),
            )
        })
    }

    #[cfg(not(any(feature = "tls-native-roots", feature = "tls-webpki-roots")))]
    {
        Err(ClientError::Request(
            "no TLS root certificates: enable `tls-native-roots` or `tls-webpki-roots`, \
             or supply a TLS config"
                .to_string(),
        ))
    }
}

/// Build an HTTPS-or-HTTP connector.
///
/// Without a custom TLS config the default one is built from the enabled
/// features; if that is not possible a [`ClientError::Request`] is returned.
pub fn build_https_connector(
    tls_config: Option<ClientConfig>,
    connect_timeout: Option<Duration>,
) -> Result<HttpsConnector<HttpConnector>, ClientError> {
    let config = resolve_tls_config(tls_config)?;

    let mut http = HttpConnector::new();
    // the https wrapper handles the scheme check
    http.enforce_http(false);
    http.set_connect_timeout(connect_timeout);

    Ok(HttpsConnectorBuilder::new()
        .with_tls_config(config)
        .https_or_http()
        .enable_all_versions()
        .wrap_connector(http))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tls_support_matches_features() {
        let expected = cfg!(any(feature = "tls-ring", feature = "tls-aws-lc"))
            && cfg!(any(feature = "tls-native-roots", feature = "tls-webpki-roots"));
        assert_eq!(has_tls_support(), expected);
    }

    #[cfg(feature = "tls")]
    #[test]
    fn test_default_tls_config_available() {
        assert!(default_tls_config().is_some());
    }

    #[cfg(feature = "tls")]
    #[test]
    fn test_build_https_connector_default() {
        assert!(build_https_connector(None, Some(Duration::from_secs(1))).is_ok());
    }
}
