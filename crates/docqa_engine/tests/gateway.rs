use std::sync::Arc;
use std::time::Duration;

use docqa_engine::{
    DocumentApi, DocumentRecord, FailureKind, Gateway, GatewaySettings, HttpDocumentApi,
    MemoryCredentialStore, SessionContext, TokenPair,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn api_for(server: &MockServer, session: SessionContext) -> HttpDocumentApi {
    let settings = GatewaySettings::parse(&format!("{}/api", server.uri())).expect("base url");
    HttpDocumentApi::new(Gateway::new(settings, session).expect("gateway"))
}

fn signed_in() -> SessionContext {
    let session = SessionContext::new(Arc::new(MemoryCredentialStore::new()));
    session.save("acc-token", "ref-token").expect("save");
    session
}

#[tokio::test]
async fn list_documents_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents/"))
        .and(header("authorization", "Bearer acc-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "file": "/media/report.pdf", "uploaded_at": "2024-01-01T00:00:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, signed_in());
    let documents = api.list_documents().await.expect("list ok");

    assert_eq!(
        documents,
        vec![DocumentRecord {
            id: 1,
            file: "/media/report.pdf".to_string(),
        }]
    );
}

#[tokio::test]
async fn request_without_token_is_sent_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Authentication credentials were not provided."
        })))
        .mount(&server)
        .await;

    let api = api_for(&server, SessionContext::in_memory());
    let err = api.list_documents().await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(401));
    assert_eq!(err.server_message, None);
    let received = server.received_requests().await.expect("recorded");
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn token_is_read_at_dispatch_time() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/documents/9/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    let api = api_for(&server, session.clone());
    session.save("late-token", "r").expect("save");

    api.delete_document(9).await.expect("delete ok");

    let received = server.received_requests().await.expect("recorded");
    let auth = received[0]
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    assert_eq!(auth, Some("Bearer late-token"));
}

#[tokio::test]
async fn obtain_token_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a1", "refresh": "r1"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server, SessionContext::in_memory());
    let tokens = api.obtain_token("alice", "secret").await.expect("token ok");

    assert_eq!(
        tokens,
        TokenPair {
            access: "a1".to_string(),
            refresh: "r1".to_string(),
        }
    );
}

#[tokio::test]
async fn register_failure_carries_server_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "User already exists"})),
        )
        .mount(&server)
        .await;

    let api = api_for(&server, SessionContext::in_memory());
    let err = api.register("bob", "pw").await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.server_message.as_deref(), Some("User already exists"));
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/documents/"))
        .and(body_string_contains("name=\"file\"; filename=\"notes.txt\""))
        .and(body_string_contains("hello upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3, "file": "/media/notes.txt"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("dir");
    let named = dir.path().join("notes.txt");
    std::fs::write(&named, b"hello upload").expect("write");

    let api = api_for(&server, signed_in());
    api.upload_document(&named).await.expect("upload ok");

    let received: Vec<Request> = server.received_requests().await.expect("recorded");
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"));
}

#[tokio::test]
async fn upload_of_missing_file_fails_without_request() {
    let server = MockServer::start().await;
    let api = api_for(&server, signed_in());

    let err = api
        .upload_document(std::path::Path::new("/definitely/not/here.pdf"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Io);
    assert!(server.received_requests().await.expect("recorded").is_empty());
}

#[tokio::test]
async fn ask_question_posts_question_and_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask-question/"))
        .and(body_json(json!({"question": "What is the total?", "document_id": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "42"})))
        .mount(&server)
        .await;

    let api = api_for(&server, signed_in());
    let answer = api
        .ask_question("What is the total?", 1)
        .await
        .expect("answer ok");

    assert_eq!(answer, "42");
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ask-question/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = api_for(&server, signed_in());
    let err = api.ask_question("q", 1).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn optional_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/documents/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let mut settings = GatewaySettings::parse(&format!("{}/api/", server.uri())).expect("url");
    settings.request_timeout = Some(Duration::from_millis(50));
    let api = HttpDocumentApi::new(Gateway::new(settings, signed_in()).expect("gateway"));

    let err = api.list_documents().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[test]
fn base_url_gets_trailing_slash() {
    let settings = GatewaySettings::parse("https://example.com/api").expect("url");
    assert_eq!(settings.base_url.as_str(), "https://example.com/api/");
}
