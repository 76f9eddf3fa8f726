//! `RandomUserClient` behavior against a local mock server.
use randpop::domain::model::{ApiConfig, FetchError};
use randpop::domain::record;
use randpop::infra::reqwest_http::RandomUserClient;
use randpop::ports::http::UserApi;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> RandomUserClient {
    RandomUserClient::new(&ApiConfig {
        url: format!("{}/api/", server.uri()),
        batch_size: 5000,
        user_agent: "randpop-test".to_string(),
        timeout_seconds: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn fetches_the_results_array() {
    let server = MockServer::start().await;
    let body = json!({
        "results": [
            {"id": {"name": "PPS", "value": "0390511T"}, "login": {"username": "silverswan131"}},
            {"id": {"name": "SSN", "value": "1"}, "login": {"username": "a"}},
            {"id": {"name": "SSN", "value": "2"}, "login": {"username": "b"}}
        ],
        "info": {"seed": "fea8be3e64777240", "results": 3, "page": 1, "version": "1.3"}
    });
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("results", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let users = client_for(&server).fetch_users(3).await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(record::identity_key(&users[0]), "PPS0390511T");
}

#[tokio::test]
async fn missing_results_key_yields_empty_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Uh oh"})))
        .mount(&server)
        .await;

    let users = client_for(&server).fetch_users(0).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn non_success_status_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_users(10).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(503)), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_users(10).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}
