//! GraphQL error types.
//!
//! This module provides:
//! - [`GraphqlError`]: A single structured error from the `errors` field
//! - [`GraphqlErrorList`]: The ordered list of errors of one response
//! - [`EnvelopeError`]: Failures while decoding a response envelope

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Position in the query document (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// One segment of an error path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Field name or alias.
    Key(String),
    /// List index.
    Index(u64),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// A structured error returned by the server inside the `errors` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphqlError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            locations: None,
            extensions: None,
        }
    }

    /// Attach a response path.
    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = Some(path);
        self
    }

    /// Look up an extension entry, e.g. `"code"`.
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.as_ref()?.get(key)
    }
}

impl fmt::Display for GraphqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            let mut first = true;
            for segment in path {
                if !first {
                    f.write_str(".")?;
                }
                write!(f, "{}", segment)?;
                first = false;
            }
            f.write_str(": ")?;
        }
        f.write_str(&self.message)
    }
}

impl std::error::Error for GraphqlError {}

/// The errors of a single response, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphqlErrorList(Vec<GraphqlError>);

impl GraphqlErrorList {
    pub fn new(errors: Vec<GraphqlError>) -> Self {
        Self(errors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GraphqlError> {
        self.0.iter()
    }

    /// Messages of all errors, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.message.as_str())
    }

    pub fn into_inner(self) -> Vec<GraphqlError> {
        self.0
    }
}

impl std::ops::Deref for GraphqlErrorList {
    type Target = [GraphqlError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a GraphqlErrorList {
    type Item = &'a GraphqlError;
    type IntoIter = std::slice::Iter<'a, GraphqlError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<GraphqlError>> for GraphqlErrorList {
    fn from(errors: Vec<GraphqlError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for GraphqlErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphqlErrorList {}

/// Errors from decoding a response envelope.
///
/// A well-formed `errors` list is not an `EnvelopeError`; it is returned as
/// [`Decoded::Errors`](crate::Decoded::Errors).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// The body is not a JSON `{data, errors}` object.
    #[error("failed to decode response {body}: {reason}")]
    Malformed { body: String, reason: String },
    /// `errors` is present but not a list of GraphQL errors.
    #[error("failed to parse graphql errors {errors}: {reason}")]
    Errors { errors: String, reason: String },
    /// `data` does not match the target type.
    #[error("failed to decode data into response {data}: {reason}")]
    Data { data: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_graphql_error_deserialize_full() {
        let err: GraphqlError = serde_json::from_value(json!({
            "message": "not allowed",
            "path": ["user", 0, "email"],
            "locations": [{"line": 2, "column": 5}],
            "extensions": {"code": "FORBIDDEN"}
        }))
        .unwrap();

        assert_eq!(err.message, "not allowed");
        assert_eq!(
            err.path,
            Some(vec![
                PathSegment::Key("user".into()),
                PathSegment::Index(0),
                PathSegment::Key("email".into()),
            ])
        );
        assert_eq!(err.locations, Some(vec![Location { line: 2, column: 5 }]));
        assert_eq!(err.extension("code"), Some(&json!("FORBIDDEN")));
    }

    #[test]
    fn test_graphql_error_message_only() {
        let err: GraphqlError = serde_json::from_value(json!({"message": "bad field"})).unwrap();
        assert_eq!(err, GraphqlError::new("bad field"));
        assert!(err.extension("code").is_none());
        assert_eq!(serde_json::to_value(&err).unwrap(), json!({"message": "bad field"}));
    }

    #[test]
    fn test_graphql_error_display_with_path() {
        let err = GraphqlError::new("boom")
            .with_path(vec![PathSegment::Key("items".into()), PathSegment::Index(3)]);
        assert_eq!(err.to_string(), "items.3: boom");
        assert_eq!(GraphqlError::new("boom").to_string(), "boom");
    }

    #[test]
    fn test_error_list_display_joins_lines() {
        let list = GraphqlErrorList::new(vec![GraphqlError::new("one"), GraphqlError::new("two")]);
        assert_eq!(list.to_string(), "one\ntwo");
        assert_eq!(list.messages().collect::<Vec<_>>(), vec!["one", "two"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_error_list_serializes_as_array() {
        let list = GraphqlErrorList::from(vec![GraphqlError::new("x")]);
        assert_eq!(serde_json::to_value(&list).unwrap(), json!([{"message": "x"}]));
    }
}
