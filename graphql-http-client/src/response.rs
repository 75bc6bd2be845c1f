//! Response interpretation.
//!
//! A GraphQL server can report failure at two independent layers: the HTTP
//! status and the `errors` field of the body. This module reconciles both
//! into a single `Result`:
//!
//! | status    | body                          | outcome                                  |
//! |-----------|-------------------------------|------------------------------------------|
//! | 2xx       | `data`, no `errors`           | `Ok(data)`                               |
//! | 2xx       | non-empty `errors`            | `ErrorResponse { graphql_errors }`       |
//! | any       | `errors` not a list of errors | `ClientError::Decode`                    |
//! | 2xx       | malformed / `data` mismatch   | `ClientError::Decode`                    |
//! | non-2xx   | non-empty `errors`            | `ErrorResponse { network_error, graphql_errors }` |
//! | non-2xx   | anything else                 | `ErrorResponse { network_error }`        |

use bytes::Bytes;
use graphql_http_core::{Decoded, EnvelopeError, decode_envelope};
use http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, ErrorResponse, NetworkError};

/// Status and full body of an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    status: StatusCode,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Interpret a raw response as the outcome of a GraphQL call.
///
/// A non-2xx status yields an [`ErrorResponse`] carrying a [`NetworkError`].
/// Under such a status a body that is not an envelope, or whose `data` does
/// not fit `T`, is not reported. An `errors` field that is not a list of
/// GraphQL errors is always a [`ClientError::Decode`]. A non-empty `errors`
/// list is attached regardless of the status, and `data` is discarded in that
/// case.
pub fn interpret<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, ClientError> {
    let network_error = NetworkError::from_status(raw.status, &raw.body);

    let decoded = match decode_envelope::<T>(&raw.body) {
        Ok(decoded) => decoded,
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                status = raw.status.as_u16(),
                error = %err,
                suppressed = network_error.is_some(),
                "graphql response did not decode"
            );
            return match (err, network_error) {
                (err @ EnvelopeError::Errors { .. }, _) | (err, None) => Err(err.into()),
                (_, Some(network_error)) => Err(ErrorResponse {
                    network_error: Some(network_error),
                    graphql_errors: None,
                }
                .into()),
            };
        }
    };

    match (decoded, network_error) {
        (Decoded::Data(data), None) => Ok(data),
        (Decoded::Data(_), Some(network_error)) => Err(ErrorResponse {
            network_error: Some(network_error),
            graphql_errors: None,
        }
        .into()),
        (Decoded::Errors(errors), network_error) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                status = raw.status.as_u16(),
                count = errors.len(),
                "graphql errors in response"
            );
            Err(ErrorResponse {
                network_error,
                graphql_errors: Some(errors),
            }
            .into())
        }
    }
}
