use std::net::TcpListener;
use std::time::Duration;

use notes_engine::{ClientSettings, FailureKind, NotesClient, NotesResponse, ReqwestNotesClient};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestNotesClient {
    ReqwestNotesClient::new(ClientSettings {
        endpoint: format!("{}/process", server.uri()),
        ..ClientSettings::default()
    })
}

fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/process")
}

#[test]
fn default_endpoint_is_local_process_route() {
    let settings = ClientSettings::default();
    assert_eq!(settings.endpoint, "http://127.0.0.1:5001/process");
    assert_eq!(settings.request_timeout, None);
}

#[tokio::test]
async fn posts_video_url_as_json_and_parses_both_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "video_url": "https://youtu.be/dQw4w9WgXcQ" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "S",
            "pdf_url": "U",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .process("https://youtu.be/dQw4w9WgXcQ")
        .await
        .expect("process ok");

    assert_eq!(
        response,
        NotesResponse {
            summary: Some("S".to_string()),
            pdf_url: Some("U".to_string()),
        }
    );
}

#[tokio::test]
async fn empty_input_is_sent_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_json(json!({ "video_url": "" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "summary": "S" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).process("").await.expect("process ok");

    assert_eq!(response.summary.as_deref(), Some("S"));
    assert_eq!(response.pdf_url, None);
}

#[tokio::test]
async fn null_and_unknown_fields_are_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "S",
            "pdf_url": null,
            "elapsed_ms": 1200,
        })))
        .mount(&server)
        .await;

    let response = client_for(&server).process("x").await.expect("process ok");

    assert_eq!(response.summary.as_deref(), Some("S"));
    assert_eq!(response.pdf_url, None);
}

#[tokio::test]
async fn server_error_status_fails_regardless_of_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "summary": "ignored" })))
        .mount(&server)
        .await;

    let err = client_for(&server).process("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn bad_request_status_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Missing YouTube URL" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).process("").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
}

#[tokio::test]
async fn malformed_body_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).process("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn connection_refused_is_network_failure() {
    let client = ReqwestNotesClient::new(ClientSettings {
        endpoint: refused_endpoint(),
        ..ClientSettings::default()
    });

    let err = client.process("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn invalid_endpoint_is_reported() {
    let client = ReqwestNotesClient::new(ClientSettings {
        endpoint: "not a url".to_string(),
        ..ClientSettings::default()
    });

    let err = client.process("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}

#[tokio::test]
async fn configured_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "summary": "late" })),
        )
        .mount(&server)
        .await;

    let client = ReqwestNotesClient::new(ClientSettings {
        endpoint: format!("{}/process", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    });

    let err = client.process("x").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn download_resolves_relative_reference() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/static/output.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = client_for(&server)
        .download("/static/output.pdf")
        .await
        .expect("download ok");

    assert_eq!(bytes, b"%PDF-1.4");
}

#[tokio::test]
async fn download_absolute_reference_and_size_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/static/output.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Length", "11")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let client = ReqwestNotesClient::new(ClientSettings {
        endpoint: "http://127.0.0.1:5001/process".to_string(),
        max_artifact_bytes: 10,
        ..ClientSettings::default()
    });
    let reference = format!("{}/static/output.pdf", server.uri());

    let err = client.download(&reference).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[test]
fn artifact_references_resolve_against_endpoint() {
    let client = ReqwestNotesClient::new(ClientSettings::default());

    assert_eq!(
        client.resolve_artifact_url("/static/output.pdf").unwrap().as_str(),
        "http://127.0.0.1:5001/static/output.pdf"
    );
    assert_eq!(
        client
            .resolve_artifact_url("https://cdn.example.com/a.pdf")
            .unwrap()
            .as_str(),
        "https://cdn.example.com/a.pdf"
    );
}
