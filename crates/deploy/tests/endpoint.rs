use offering_deploy::{
    config::ApiKey,
    endpoint::{resolve, Endpoint, EndpointKind, NetworkError, FALLBACK_ENDPOINT},
};
use util::*;

pub mod util;

const DISCOVERED: &str = "https://ton-access.example/1/mainnet/toncenter-api-v2/jsonRPC";

#[tokio::test]
async fn discovered_endpoint_is_preferred() {
    let source = StubEndpoints::new(Ok(DISCOVERED.to_string()));
    let key = ApiKey::new("key");
    let endpoint = resolve(&source, Some(&key)).await.unwrap();
    assert_eq!(
        endpoint,
        Endpoint {
            url: DISCOVERED.to_string(),
            api_key: Some(key),
            kind: EndpointKind::Discovered,
        }
    );
    let endpoint = resolve(&source, None).await.unwrap();
    assert_eq!(endpoint.api_key, None);
}

#[tokio::test]
async fn falls_back_with_api_key() {
    let source = StubEndpoints::new(Err(StubError("offline")));
    let key = ApiKey::new("key");
    let endpoint = resolve(&source, Some(&key)).await.unwrap();
    assert_eq!(endpoint.url, FALLBACK_ENDPOINT);
    assert_eq!(endpoint.kind, EndpointKind::Fallback);
    assert_eq!(endpoint.api_key.as_ref().map(ApiKey::expose), Some("key"));
}

#[tokio::test]
async fn no_endpoint_without_api_key() {
    let source = StubEndpoints::new(Err(StubError("offline")));
    assert_eq!(
        resolve(&source, None).await.unwrap_err(),
        NetworkError::NoEndpoint {
            reason: "stub failure: offline".to_string()
        }
    );
}
