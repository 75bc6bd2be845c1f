//! Request body type for HTTP transport.
//!
//! This module provides [`TransportBody`], the body of an outgoing GraphQL
//! request. The whole JSON payload is available up front, so the body yields
//! a single data frame.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};

use crate::ClientError;

/// A request body holding the serialized GraphQL payload.
#[derive(Clone, Default)]
pub struct TransportBody {
    data: Option<Bytes>,
}

impl TransportBody {
    /// Create an empty body.
    pub fn empty() -> Self {
        Self { data: None }
    }

    /// Create a body with the given data.
    pub fn full(data: Bytes) -> Self {
        if data.is_empty() {
            return Self::empty();
        }
        Self { data: Some(data) }
    }

    /// The bytes not yet yielded as a frame.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }
}

impl Body for TransportBody {
    type Data = Bytes;
    type Error = ClientError;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.get_mut().data.take().map(|d| Ok(Frame::data(d))))
    }

    fn is_end_stream(&self) -> bool {
        self.data.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        let len = self.data.as_ref().map_or(0, |d| d.len() as u64);
        SizeHint::with_exact(len)
    }
}

impl std::fmt::Debug for TransportBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportBody")
            .field("data_len", &self.data.as_ref().map(|d| d.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_empty_body() {
        let body = TransportBody::empty();
        assert!(body.is_end_stream());
        assert_eq!(body.size_hint().exact(), Some(0));

        let collected = body.collect().await.unwrap();
        assert!(collected.to_bytes().is_empty());
    }

    #[tokio::test]
    async fn test_full_body() {
        let data = Bytes::from(r#"{"query":"{ a }"}"#);
        let body = TransportBody::full(data.clone());
        assert!(!body.is_end_stream());
        assert_eq!(body.size_hint().exact(), Some(data.len() as u64));

        let collected = body.collect().await.unwrap();
        assert_eq!(collected.to_bytes(), data);
    }

    #[test]
    fn test_full_with_no_bytes_is_empty() {
        assert!(TransportBody::full(Bytes::new()).is_end_stream());
    }
}
