//! Client-side error types.
//!
//! This module provides [`ClientError`], the error type of every GraphQL call,
//! and [`ErrorResponse`], the structured outcome a caller inspects when the
//! server answered but the call did not succeed.

use std::fmt;

use graphql_http_core::{EnvelopeError, GraphqlErrorList};
use http::StatusCode;
use serde::Serialize;

/// Failure classified from an HTTP status outside `200..=299`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NetworkError {
    /// HTTP status code.
    pub code: u16,
    /// Human-readable message embedding the raw response body.
    pub message: String,
}

impl NetworkError {
    /// Build a network error for `status`, or `None` if the status is a success.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Option<Self> {
        if (200..=299).contains(&status.as_u16()) {
            return None;
        }
        Some(Self {
            code: status.as_u16(),
            message: format!("Response body {}", String::from_utf8_lossy(body)),
        })
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http status {}: {}", self.code, self.message)
    }
}

/// A response the server produced that is not a success.
///
/// The two parts are independent: a server may answer `500` with a well-formed
/// `errors` list, in which case both are set.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Set when the HTTP status is not in `200..=299`.
    #[serde(rename = "networkErrors")]
    pub network_error: Option<NetworkError>,
    /// Set when the body carried a non-empty `errors` list.
    #[serde(rename = "graphqlErrors")]
    pub graphql_errors: Option<GraphqlErrorList>,
}

impl ErrorResponse {
    /// Returns true when at least one of the two parts is set.
    pub fn has_errors(&self) -> bool {
        self.network_error.is_some() || self.graphql_errors.is_some()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ErrorResponse {}

/// Error returned by a GraphQL call.
///
/// `Encode`, `Request`, `Transport` and `Decode` are local failures that stop
/// the call before a structured outcome exists. `Response` is the structured
/// outcome of a call the server answered.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ClientError {
    /// The request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),

    /// The HTTP request could not be constructed (e.g. malformed endpoint).
    #[error("request error: {0}")]
    Request(String),

    /// Transport-level error (connection failed, timeout, cancellation, etc.).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The server reported a network error, GraphQL errors, or both.
    #[error("{0}")]
    Response(ErrorResponse),
}

impl ClientError {
    /// The structured response error, if this is one.
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            ClientError::Response(response) => Some(response),
            _ => None,
        }
    }

    /// The network error part of a structured response error.
    pub fn network_error(&self) -> Option<&NetworkError> {
        self.error_response()?.network_error.as_ref()
    }

    /// The GraphQL errors part of a structured response error.
    pub fn graphql_errors(&self) -> Option<&GraphqlErrorList> {
        self.error_response()?.graphql_errors.as_ref()
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode(_))
    }
}

impl From<ErrorResponse> for ClientError {
    fn from(response: ErrorResponse) -> Self {
        ClientError::Response(response)
    }
}

impl From<EnvelopeError> for ClientError {
    fn from(err: EnvelopeError) -> Self {
        ClientError::Decode(err.to_string())
    }
}
