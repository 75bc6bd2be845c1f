//! Response envelope decoding.
//!
//! A GraphQL response body has the form:
//! ```json
//! {"data": ..., "errors": [{"message": "...", "path": [...], "extensions": {...}}]}
//! ```
//! Both fields are kept as raw JSON until the `errors` field has been
//! classified, so `data` is only decoded when there are no errors.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::error::{EnvelopeError, GraphqlError, GraphqlErrorList};

/// The `{data, errors}` wire shape with both fields left undecoded.
///
/// Read through a map so that only a JSON object is accepted; a derived
/// struct visitor would also take a positional array.
#[derive(Debug)]
struct ResponseEnvelope {
    data: Option<Box<RawValue>>,
    errors: Option<Box<RawValue>>,
}

impl ResponseEnvelope {
    fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut fields: HashMap<String, Option<Box<RawValue>>> = serde_json::from_slice(body)?;
        Ok(Self {
            data: fields.remove("data").flatten(),
            errors: fields.remove("errors").flatten(),
        })
    }
}

/// Successfully decoded envelope contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// No errors were reported; `data` decoded into the target type.
    Data(T),
    /// The server reported at least one error. Any `data` was discarded.
    Errors(GraphqlErrorList),
}

impl<T> Decoded<T> {
    /// Returns the data, if no errors were reported.
    pub fn data(self) -> Option<T> {
        match self {
            Decoded::Data(data) => Some(data),
            Decoded::Errors(_) => None,
        }
    }
}

/// Decode a response body.
///
/// - `errors` present and non-empty: returns [`Decoded::Errors`] without
///   looking at `data`.
/// - `errors` absent, `null` or `[]`: decodes `data` into `T`. A missing or
///   `null` `data` is decoded from JSON `null`.
///
/// Fails with [`EnvelopeError::Malformed`] if the body itself is not an
/// envelope, [`EnvelopeError::Errors`] if `errors` is not a list of GraphQL
/// errors and [`EnvelopeError::Data`] if `data` does not fit `T`.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Decoded<T>, EnvelopeError> {
    let envelope = ResponseEnvelope::from_slice(body).map_err(|e| EnvelopeError::Malformed {
        body: String::from_utf8_lossy(body).into_owned(),
        reason: e.to_string(),
    })?;

    if let Some(raw) = envelope.errors.as_deref() {
        let errors: Vec<GraphqlError> =
            serde_json::from_str(raw.get()).map_err(|e| EnvelopeError::Errors {
                errors: raw.get().to_owned(),
                reason: e.to_string(),
            })?;
        if !errors.is_empty() {
            return Ok(Decoded::Errors(GraphqlErrorList::new(errors)));
        }
    }

    let raw_data = envelope.data.as_deref().map_or("null", RawValue::get);
    serde_json::from_str(raw_data)
        .map(Decoded::Data)
        .map_err(|e| EnvelopeError::Data {
            data: raw_data.to_owned(),
            reason: e.to_string(),
        })
}
