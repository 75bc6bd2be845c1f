//! Operation variables.
//!
//! The wire protocol distinguishes an omitted argument from an argument that
//! is explicitly `null`. Generated call sites pass `null` for "not provided",
//! so null entries are stripped before the request is serialized.

use serde::Serialize;
use serde_json::{Map, Value};

/// Variables of a GraphQL operation, keyed by variable name.
pub type Variables = Map<String, Value>;

/// Remove every null-valued entry from `variables`.
///
/// Nested objects are sanitized recursively. Any other non-null value,
/// including arrays and their elements, is kept as is.
///
/// # Example
///
/// ```
/// use graphql_http_core::sanitize_variables;
/// use serde_json::json;
///
/// let vars = json!({"id": 1, "after": null, "filter": {"name": null, "tags": []}});
/// let vars = sanitize_variables(vars.as_object().unwrap().clone());
/// assert_eq!(serde_json::Value::Object(vars), json!({"id": 1, "filter": {"tags": []}}));
/// ```
pub fn sanitize_variables(variables: Variables) -> Variables {
    variables
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::Object(nested) => Some((key, Value::Object(sanitize_variables(nested)))),
            other => Some((key, other)),
        })
        .collect()
}

/// Convert a typed variables value into a [`Variables`] mapping.
///
/// `value` must serialize to a JSON object; `()` and unit structs serialize to
/// `null` and yield an empty mapping. Fields holding `None` become `null` and
/// are dropped later by [`sanitize_variables`].
pub fn variables_from<T: Serialize + ?Sized>(value: &T) -> Result<Variables, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Variables::new()),
        other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
            "variables must serialize to a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
