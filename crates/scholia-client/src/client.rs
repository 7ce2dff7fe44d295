//! Async HTTP client wrapping the Scholia backend's JSON API.

use std::time::Duration;

use reqwest::{
  Client, RequestBuilder, Response,
  multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
  error::{ClientError, Result, error_message},
  types::{
    AiActionRequest, AiActionResponse, DoubtReceipt, DoubtRequest, Lesson,
    QueryRequest, QueryResponse, TestPaper, TestResult, TestSubmission,
    UploadResponse,
  },
};

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Sent as a bearer token when present.
  pub api_key:  Option<String>,
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8000".to_owned(),
      api_key:  None,
      timeout:  Duration::from_secs(60),
    }
  }
}

/// Async HTTP client for the backend REST API.
///
/// Every call takes a [`CancellationToken`]; cancelling it drops the request
/// in flight and the call returns [`ClientError::Cancelled`]. Nothing is
/// retried.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Build)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.config.api_key {
      Some(key) => req.bearer_auth(key),
      None => req,
    }
  }

  /// Send `req`, map error statuses and decode the body, unless `cancel`
  /// fires first.
  async fn send<T: DeserializeOwned>(
    &self,
    what: &'static str,
    req: RequestBuilder,
    cancel: &CancellationToken,
  ) -> Result<T> {
    let call = async {
      debug!(request = what, "sending");
      let resp = check_status(self.auth(req).send().await?).await?;
      resp.json::<T>().await.map_err(ClientError::Decode)
    };

    tokio::select! {
      biased;
      () = cancel.cancelled() => {
        debug!(request = what, "cancelled");
        Err(ClientError::Cancelled)
      }
      out = call => out,
    }
  }

  // ── Annotations ───────────────────────────────────────────────────────────

  /// `POST /api/annotations/ai`: run an AI action on a selected excerpt and
  /// return the generated text.
  pub async fn ai_action(
    &self,
    request: &AiActionRequest,
    cancel: &CancellationToken,
  ) -> Result<String> {
    let req = self.client.post(self.url("/annotations/ai")).json(request);
    let body: AiActionResponse = self.send("POST /annotations/ai", req, cancel).await?;
    Ok(body.response)
  }

  // ── Retrieval ─────────────────────────────────────────────────────────────

  /// `POST /api/rag/query`
  pub async fn ask(
    &self,
    request: &QueryRequest,
    cancel: &CancellationToken,
  ) -> Result<QueryResponse> {
    let req = self.client.post(self.url("/rag/query")).json(request);
    self.send("POST /rag/query", req, cancel).await
  }

  // ── Lessons ───────────────────────────────────────────────────────────────

  /// `GET /api/lessons`
  pub async fn list_lessons(&self, cancel: &CancellationToken) -> Result<Vec<Lesson>> {
    let req = self.client.get(self.url("/lessons"));
    self.send("GET /lessons", req, cancel).await
  }

  /// `POST /api/documents`: upload a PDF for OCR and indexing.
  pub async fn upload_document(
    &self,
    file_name: &str,
    bytes: Vec<u8>,
    title: Option<&str>,
    cancel: &CancellationToken,
  ) -> Result<UploadResponse> {
    let part = Part::bytes(bytes)
      .file_name(file_name.to_owned())
      .mime_str("application/pdf")?;
    let mut form = Form::new().part("file", part);
    if let Some(title) = title {
      form = form.text("title", title.to_owned());
    }
    let req = self.client.post(self.url("/documents")).multipart(form);
    self.send("POST /documents", req, cancel).await
  }

  // ── Tests ─────────────────────────────────────────────────────────────────

  /// `GET /api/tests/{id}`
  pub async fn get_test(
    &self,
    test_id: &str,
    cancel: &CancellationToken,
  ) -> Result<TestPaper> {
    let req = self.client.get(self.url(&format!("/tests/{test_id}")));
    self.send("GET /tests/{id}", req, cancel).await
  }

  /// `POST /api/tests/{id}/submit`
  pub async fn submit_test(
    &self,
    test_id: &str,
    submission: &TestSubmission,
    cancel: &CancellationToken,
  ) -> Result<TestResult> {
    let req = self
      .client
      .post(self.url(&format!("/tests/{test_id}/submit")))
      .json(submission);
    self.send("POST /tests/{id}/submit", req, cancel).await
  }

  // ── Doubts ────────────────────────────────────────────────────────────────

  /// `POST /api/doubts`: returns the backend's id for the doubt.
  pub async fn submit_doubt(
    &self,
    request: &DoubtRequest,
    cancel: &CancellationToken,
  ) -> Result<String> {
    let req = self.client.post(self.url("/doubts")).json(request);
    let receipt: DoubtReceipt = self.send("POST /doubts", req, cancel).await?;
    Ok(receipt.id)
  }
}

async fn check_status(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  let message = error_message(status, &body);
  warn!(%status, %message, "backend rejected request");
  Err(ClientError::Api { status, message })
}
