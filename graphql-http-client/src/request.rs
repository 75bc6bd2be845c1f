//! Outgoing request construction.

use graphql_http_core::GraphqlRequest;
use http::{Method, Request, Uri};

use crate::ClientError;
use crate::config::MutatorChain;
use crate::transport::TransportBody;

/// Build the HTTP POST for `request` and run the mutators over it.
///
/// Client mutators run before call mutators. `Content-Type` and `Accept` are
/// not set here; the invoker sets them after every mutator has run.
pub(crate) fn build_request(
    endpoint: &str,
    request: &GraphqlRequest,
    client_mutators: &MutatorChain,
    call_mutators: &MutatorChain,
) -> Result<Request<TransportBody>, ClientError> {
    let body = request
        .to_bytes()
        .map_err(|e| ClientError::Encode(format!("failed to encode request: {}", e)))?;

    let uri: Uri = endpoint
        .parse()
        .map_err(|e| ClientError::Request(format!("invalid endpoint {:?}: {}", endpoint, e)))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(ClientError::Request(format!(
            "endpoint must be an absolute URI with scheme and host, got {:?}",
            endpoint
        )));
    }

    let (mut parts, body) = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(TransportBody::full(body))
        .map_err(|e| ClientError::Request(format!("failed to build request: {}", e)))?
        .into_parts();

    client_mutators.apply(&mut parts);
    call_mutators.apply(&mut parts);

    Ok(Request::from_parts(parts, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HeaderMutator, Mutator};
    use graphql_http_core::Variables;
    use http::request::Parts;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    fn gql(query: &str) -> GraphqlRequest {
        GraphqlRequest::new(query, Variables::new())
    }

    fn body_json(request: &Request<TransportBody>) -> Value {
        serde_json::from_slice(request.body().as_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_builds_post_with_json_body() {
        let mut variables = Variables::new();
        variables.insert("id".into(), json!(7));
        variables.insert("gone".into(), Value::Null);
        let request = GraphqlRequest::new("query($id: Int) { node(id: $id) { id } }", variables);

        let built = build_request(
            "http://localhost:4000/graphql",
            &request,
            &MutatorChain::new(),
            &MutatorChain::new(),
        )
        .unwrap();

        assert_eq!(built.method(), Method::POST);
        assert_eq!(built.uri(), "http://localhost:4000/graphql");
        assert_eq!(
            body_json(&built),
            json!({
                "query": "query($id: Int) { node(id: $id) { id } }",
                "variables": {"id": 7}
            })
        );
    }

    #[test]
    fn test_does_not_set_content_headers() {
        let built = build_request(
            "http://localhost/graphql",
            &gql("{ a }"),
            &MutatorChain::new(),
            &MutatorChain::new(),
        )
        .unwrap();
        assert!(built.headers().get(http::header::CONTENT_TYPE).is_none());
        assert!(built.headers().get(http::header::ACCEPT).is_none());
    }

    #[test]
    fn test_client_mutators_run_before_call_mutators() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let record = |label: &'static str| {
            let order = Arc::clone(&order);
            Mutator::new(move |_: &mut Parts| order.lock().unwrap().push(label))
        };

        let mut client = MutatorChain::new();
        client.push(record("client-1"));
        client.push(record("client-2"));
        client.push(HeaderMutator::new("x-env", "client"));
        let mut call = MutatorChain::new();
        call.push(record("call-1"));
        call.push(HeaderMutator::new("x-env", "call"));

        let built =
            build_request("http://localhost/graphql", &gql("{ a }"), &client, &call).unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["client-1", "client-2", "call-1"]);
        assert_eq!(built.headers().get("x-env").unwrap(), "call");
    }

    #[test]
    fn test_relative_endpoint_rejected() {
        let err = build_request(
            "/graphql",
            &gql("{ a }"),
            &MutatorChain::new(),
            &MutatorChain::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[test]
    fn test_unparseable_endpoint_rejected() {
        let err = build_request(
            "http://exa mple.com/graphql",
            &gql("{ a }"),
            &MutatorChain::new(),
            &MutatorChain::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[test]
    fn test_operation_name_on_the_wire() {
        let request = gql("query Viewer { viewer { id } }").with_operation_name("Viewer");
        let built = build_request(
            "https://api.example.com/graphql",
            &request,
            &MutatorChain::new(),
            &MutatorChain::new(),
        )
        .unwrap();
        assert_eq!(
            body_json(&built),
            json!({"query": "query Viewer { viewer { id } }", "operationName": "Viewer"})
        );
    }
}
