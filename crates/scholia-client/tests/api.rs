//! Integration tests for `ApiClient` against a mock backend.

use std::time::Duration;

use reqwest::StatusCode;
use scholia_client::{
  ApiClient, ApiConfig, ClientError,
  types::{AiActionRequest, AnswerChoice, DoubtRequest, QueryRequest, TestSubmission},
};
use scholia_core::{annotation::AiAction, doubt::NewDoubt};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::{
  Mock, MockServer, ResponseTemplate,
  matchers::{body_json, body_string_contains, header, method, path},
};

fn client_for(server: &MockServer, api_key: Option<&str>) -> ApiClient {
  ApiClient::new(ApiConfig {
    base_url: server.uri(),
    api_key:  api_key.map(str::to_owned),
    timeout:  Duration::from_secs(10),
  })
  .expect("client builds")
}

#[tokio::test]
async fn ai_action_returns_generated_text() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/annotations/ai"))
    .and(body_json(json!({
      "text": "photosynthesis",
      "action": "define",
      "lesson_id": "bio-1",
      "page_number": 4
    })))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({ "response": "Light to sugar.", "model": "x" })),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server, None);
  let text = client
    .ai_action(
      &AiActionRequest {
        text:        "photosynthesis".into(),
        action:      AiAction::Define,
        lesson_id:   "bio-1".into(),
        page_number: 4,
      },
      &CancellationToken::new(),
    )
    .await
    .expect("ai action succeeds");
  assert_eq!(text, "Light to sugar.");
}

#[tokio::test]
async fn ask_sends_bearer_token_and_defaults_sources() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/rag/query"))
    .and(header("authorization", "Bearer secret"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "42" })))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server, Some("secret"));
  let resp = client
    .ask(
      &QueryRequest { question: "why?".into(), lesson_id: None, top_k: None },
      &CancellationToken::new(),
    )
    .await
    .expect("query succeeds");
  assert_eq!(resp.answer, "42");
  assert!(resp.sources.is_empty());
}

#[tokio::test]
async fn error_detail_is_surfaced() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/tests/t-9"))
    .respond_with(
      ResponseTemplate::new(404).set_body_json(json!({ "detail": "Test not found" })),
    )
    .mount(&server)
    .await;

  let client = client_for(&server, None);
  let err = client
    .get_test("t-9", &CancellationToken::new())
    .await
    .expect_err("missing test fails");
  match err {
    ClientError::Api { status, message } => {
      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(message, "Test not found");
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[tokio::test]
async fn server_error_without_body_uses_status_text() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/lessons"))
    .respond_with(ResponseTemplate::new(503))
    .mount(&server)
    .await;

  let client = client_for(&server, None);
  let err = client
    .list_lessons(&CancellationToken::new())
    .await
    .expect_err("503 fails");
  assert!(err.is_transient());
  assert_eq!(err.to_string(), "503 Service Unavailable: Service Unavailable");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/lessons"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lessons": [] })))
    .mount(&server)
    .await;

  let client = client_for(&server, None);
  let err = client
    .list_lessons(&CancellationToken::new())
    .await
    .expect_err("wrong shape fails");
  assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn lessons_and_test_round_trip() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/lessons"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([
      { "id": "l1", "title": "Cells", "subject": "Biology", "page_count": 12 },
      { "id": "l2", "title": "Forces" }
    ])))
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/tests/t1/submit"))
    .and(body_json(json!({
      "answers": [{ "question_id": "q1", "answer": "B" }]
    })))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({ "score": 1.0, "total": 1.0 })),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server, None);
  let cancel = CancellationToken::new();

  let lessons = client.list_lessons(&cancel).await.expect("lessons");
  assert_eq!(lessons.len(), 2);
  assert_eq!(lessons[0].page_count, 12);
  assert_eq!(lessons[1].subject, None);

  let result = client
    .submit_test(
      "t1",
      &TestSubmission {
        answers: vec![AnswerChoice { question_id: "q1".into(), answer: "B".into() }],
      },
      &cancel,
    )
    .await
    .expect("submit");
  assert_eq!(result.score, 1.0);
  assert_eq!(result.feedback, None);
}

#[tokio::test]
async fn upload_sends_multipart_file() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/documents"))
    .and(body_string_contains("name=\"file\""))
    .and(body_string_contains("filename=\"notes.pdf\""))
    .and(body_string_contains("name=\"title\""))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({ "lesson_id": "l7", "pages": 3 })),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server, None);
  let resp = client
    .upload_document(
      "notes.pdf",
      b"%PDF-1.4".to_vec(),
      Some("Chapter 1"),
      &CancellationToken::new(),
    )
    .await
    .expect("upload");
  assert_eq!(resp.lesson_id, "l7");
  assert_eq!(resp.pages, 3);
}

#[tokio::test]
async fn doubt_submission_returns_backend_id() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/doubts"))
    .and(body_json(json!({
      "student_name": "Ada",
      "subject": "Math",
      "question": "What is a limit?"
    })))
    .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "d-1" })))
    .expect(1)
    .mount(&server)
    .await;

  let draft = NewDoubt {
    student_name: "Ada".into(),
    subject:      "Math".into(),
    question:     "What is a limit?".into(),
    lesson_id:    None,
  };
  let client = client_for(&server, None);
  let id = client
    .submit_doubt(&DoubtRequest::from(&draft), &CancellationToken::new())
    .await
    .expect("doubt");
  assert_eq!(id, "d-1");
}

#[tokio::test]
async fn cancellation_abandons_slow_request() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/api/rag/query"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!({ "answer": "late" }))
        .set_delay(Duration::from_secs(5)),
    )
    .mount(&server)
    .await;

  let client = client_for(&server, None);
  let cancel = CancellationToken::new();
  let trigger = cancel.clone();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_millis(50)).await;
    trigger.cancel();
  });

  let started = std::time::Instant::now();
  let err = client
    .ask(
      &QueryRequest { question: "slow".into(), lesson_id: None, top_k: Some(3) },
      &cancel,
    )
    .await
    .expect_err("cancelled");
  assert!(matches!(err, ClientError::Cancelled));
  assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn already_cancelled_token_sends_nothing() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/lessons"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
    .expect(0)
    .mount(&server)
    .await;

  let client = client_for(&server, None);
  let cancel = CancellationToken::new();
  cancel.cancel();
  let err = client.list_lessons(&cancel).await.expect_err("cancelled");
  assert!(matches!(err, ClientError::Cancelled));
}
