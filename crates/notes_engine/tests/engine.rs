use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use notes_engine::{
    ClientSettings, EngineEvent, EngineHandle, FailureKind, NotesClient, NotesResponse,
    ProcessError,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FakeClient {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl NotesClient for FakeClient {
    async fn process(&self, video_url: &str) -> Result<NotesResponse, ProcessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(NotesResponse {
            summary: Some(format!("notes for {video_url}")),
            pdf_url: None,
        })
    }

    async fn download(&self, reference: &str) -> Result<Vec<u8>, ProcessError> {
        if reference == "slow" {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Ok(reference.as_bytes().to_vec())
    }
}

#[tokio::test]
async fn submit_round_trips_through_engine_thread() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_json(json!({ "video_url": "https://youtu.be/abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "S",
            "pdf_url": "/static/output.pdf",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(
        ClientSettings {
            endpoint: format!("{}/process", server.uri()),
            ..ClientSettings::default()
        },
        temp.path().to_path_buf(),
    );

    let reply = engine.submit(7, "https://youtu.be/abc");
    assert_eq!(reply.token(), 7);

    match reply.wait().await {
        EngineEvent::RequestCompleted { token, result } => {
            assert_eq!(token, 7);
            let response = result.expect("request ok");
            assert_eq!(response.summary.as_deref(), Some("S"));
            assert_eq!(response.pdf_url.as_deref(), Some("/static/output.pdf"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn failed_submit_reports_error_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(
        ClientSettings {
            endpoint: format!("{}/process", server.uri()),
            ..ClientSettings::default()
        },
        temp.path().to_path_buf(),
    );

    match engine.submit(1, "x").wait().await {
        EngineEvent::RequestCompleted { token, result } => {
            assert_eq!(token, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn download_saves_artifact_under_fixed_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/static/output.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("downloads");
    let engine = EngineHandle::new(
        ClientSettings {
            endpoint: format!("{}/process", server.uri()),
            ..ClientSettings::default()
        },
        out_dir.clone(),
    );

    match engine.download(3, "/static/output.pdf", "summary.pdf").wait().await {
        EngineEvent::ArtifactSaved { token, result } => {
            assert_eq!(token, 3);
            let saved = result.expect("saved");
            assert_eq!(saved, out_dir.join("summary.pdf"));
            assert_eq!(fs::read(&saved).unwrap(), b"%PDF-1.4");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn each_submit_issues_one_call() {
    let client = Arc::new(FakeClient {
        calls: AtomicUsize::new(0),
    });
    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::with_client(client.clone(), temp.path().to_path_buf());

    let first = engine.submit(1, "a").wait().await;
    let second = engine.submit(2, "b").wait().await;

    assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        first,
        EngineEvent::RequestCompleted {
            token: 1,
            result: Ok(NotesResponse {
                summary: Some("notes for a".to_string()),
                pdf_url: None,
            }),
        }
    );
    assert!(matches!(second, EngineEvent::RequestCompleted { token: 2, .. }));
}

#[tokio::test]
async fn older_download_finishing_late_does_not_overwrite_newer() {
    let client = Arc::new(FakeClient {
        calls: AtomicUsize::new(0),
    });
    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::with_client(client, temp.path().to_path_buf());

    let older = engine.download(2, "slow", "summary.pdf");
    let newer = engine.download(4, "fresh", "summary.pdf");

    match newer.wait().await {
        EngineEvent::ArtifactSaved { token, result } => {
            assert_eq!(token, 4);
            let saved = result.expect("newest download saved");
            assert_eq!(fs::read_to_string(&saved).unwrap(), "fresh");
        }
        other => panic!("unexpected event {other:?}"),
    }

    match older.wait().await {
        EngineEvent::ArtifactSaved { token, result } => {
            assert_eq!(token, 2);
            assert_eq!(result.unwrap_err().kind, FailureKind::Superseded);
        }
        other => panic!("unexpected event {other:?}"),
    }

    let content = fs::read_to_string(temp.path().join("summary.pdf")).unwrap();
    assert_eq!(content, "fresh");
}
