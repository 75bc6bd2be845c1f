//! Outgoing GraphQL request payload.

use bytes::Bytes;
use serde::Serialize;

use crate::variables::{Variables, sanitize_variables};

/// A GraphQL request as sent in the body of an HTTP POST.
///
/// Serializes to:
/// ```json
/// {"query": "...", "variables": {...}, "operationName": "..."}
/// ```
/// `variables` is omitted when empty and `operationName` when it is the
/// empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    query: String,
    #[serde(skip_serializing_if = "Variables::is_empty")]
    variables: Variables,
    #[serde(skip_serializing_if = "String::is_empty")]
    operation_name: String,
}

impl GraphqlRequest {
    /// Create a request. Null entries in `variables` are removed.
    pub fn new(query: impl Into<String>, variables: Variables) -> Self {
        Self {
            query: query.into(),
            variables: sanitize_variables(variables),
            operation_name: String::new(),
        }
    }

    /// Set the operation name (empty means "not sent").
    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = operation_name.into();
        self
    }

    /// The query document.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The sanitized variables.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// The operation name, empty when not set.
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    /// Serialize to the JSON wire encoding.
    pub fn to_bytes(&self) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(self).map(Bytes::from)
    }
}
