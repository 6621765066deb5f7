mod support;

use attache::api::{ApiClient, ApiError, ResolveError, UserId};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::session;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new().with_base_url(server.uri())
}

#[tokio::test]
async fn resolve_user_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/boss@x.com"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-boss",
            "email": "boss@x.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = client(&server)
        .resolve_user("boss@x.com", &session("tok-1"))
        .await
        .expect("resolved");
    assert_eq!(id, UserId("u-boss".to_string()));
}

#[tokio::test]
async fn resolve_user_not_found_carries_email_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost@x.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 1001,
            "message": "User does not exist"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .resolve_user("ghost@x.com", &session("tok-1"))
        .await;
    match result {
        Err(ResolveError::NotFound { email, status }) => {
            assert_eq!(email, "ghost@x.com");
            assert_eq!(status, 404);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn resolve_user_missing_id_field_is_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/odd@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "odd@x.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).resolve_user("odd@x.com", &session("tok-1")).await;
    assert!(
        matches!(result, Err(ResolveError::Transport(detail)) if detail.contains("missing id"))
    );
}

#[tokio::test]
async fn resolve_user_connection_failure_is_transport() {
    // Nothing listens on this port.
    let api = ApiClient::new().with_base_url("http://127.0.0.1:9");
    let result = api.resolve_user("boss@x.com", &session("tok-1")).await;
    assert!(matches!(result, Err(ResolveError::Transport(_))));
}

#[tokio::test]
async fn current_user_returns_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-me",
            "email": "admin@x.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client(&server)
        .current_user(&session("tok-1"))
        .await
        .expect("profile");
    assert_eq!(profile.id.as_deref(), Some("u-me"));
    assert_eq!(profile.email.as_deref(), Some("admin@x.com"));
}

#[tokio::test]
async fn current_user_non_success_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).current_user(&session("tok-1")).await;
    assert!(matches!(
        result,
        Err(ResolveError::NotFound { status: 401, .. })
    ));
}

#[tokio::test]
async fn list_assistants_decodes_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u-boss/assistants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "assistants": [
                { "id": "u-a", "email": "a@x.com" },
                { "id": "u-b", "email": "b@x.com" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let assistants = client(&server)
        .list_assistants(&UserId("u-boss".to_string()), &session("tok-1"))
        .await
        .expect("assistants");
    assert_eq!(assistants.len(), 2);
    assert_eq!(assistants[0].email.as_deref(), Some("a@x.com"));
    assert_eq!(assistants[1].email.as_deref(), Some("b@x.com"));
}

#[tokio::test]
async fn list_assistants_missing_array_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u-boss/assistants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let assistants = client(&server)
        .list_assistants(&UserId("u-boss".to_string()), &session("tok-1"))
        .await
        .expect("assistants");
    assert!(assistants.is_empty());
}

#[tokio::test]
async fn list_assistants_error_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u-boss/assistants"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .list_assistants(&UserId("u-boss".to_string()), &session("tok-1"))
        .await;
    assert!(
        matches!(result, Err(ApiError::Status { status: 403, body }) if body == "forbidden")
    );
}

#[tokio::test]
async fn add_assistant_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/u-boss/assistants"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_json(json!({ "assistants": [{ "email": "a@x.com" }] })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .add_assistant(&UserId("u-boss".to_string()), "a@x.com", &session("tok-1"))
        .await
        .expect("assistant added");
}

#[tokio::test]
async fn add_assistant_accepts_204() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/u-boss/assistants"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .add_assistant(&UserId("u-boss".to_string()), "a@x.com", &session("tok-1"))
        .await
        .expect("assistant added");
}

#[tokio::test]
async fn add_assistant_rejects_other_success_codes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/u-boss/assistants"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .add_assistant(&UserId("u-boss".to_string()), "a@x.com", &session("tok-1"))
        .await;
    assert!(matches!(result, Err(ApiError::Status { status: 202, .. })));
}

#[tokio::test]
async fn add_assistant_failure_captures_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/u-boss/assistants"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already delegated"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server)
        .add_assistant(&UserId("u-boss".to_string()), "a@x.com", &session("tok-1"))
        .await;
    assert!(
        matches!(result, Err(ApiError::Status { status: 409, body }) if body.contains("already delegated"))
    );
}
