//! Request and response bodies for the backend API.
//!
//! Response structs name only the fields the app reads; anything else the
//! backend sends is ignored.

use scholia_core::{annotation::AiAction, doubt::NewDoubt};
use serde::{Deserialize, Serialize};

// ─── AI annotation actions ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct AiActionRequest {
  pub text:        String,
  pub action:      AiAction,
  pub lesson_id:   String,
  pub page_number: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AiActionResponse {
  pub response: String,
}

// ─── Retrieval-augmented questions ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
  pub question:  String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lesson_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub top_k:     Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRef {
  #[serde(default)]
  pub page:    Option<u32>,
  pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResponse {
  pub answer:  String,
  #[serde(default)]
  pub sources: Vec<SourceRef>,
}

// ─── Lessons and documents ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lesson {
  pub id:         String,
  pub title:      String,
  #[serde(default)]
  pub subject:    Option<String>,
  #[serde(default)]
  pub page_count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
  pub lesson_id: String,
  pub pages:     u32,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
  pub id:      String,
  pub prompt:  String,
  /// Empty for free-text questions.
  #[serde(default)]
  pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestPaper {
  pub id:               String,
  pub title:            String,
  pub duration_minutes: u32,
  pub questions:        Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerChoice {
  pub question_id: String,
  pub answer:      String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestSubmission {
  pub answers: Vec<AnswerChoice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestResult {
  pub score:    f64,
  pub total:    f64,
  #[serde(default)]
  pub feedback: Option<String>,
}

// ─── Doubts ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DoubtRequest {
  pub student_name: String,
  pub subject:      String,
  pub question:     String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lesson_id:    Option<String>,
}

impl From<&NewDoubt> for DoubtRequest {
  fn from(d: &NewDoubt) -> Self {
    Self {
      student_name: d.student_name.clone(),
      subject:      d.subject.clone(),
      question:     d.question.clone(),
      lesson_id:    d.lesson_id.clone(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DoubtReceipt {
  pub id: String,
}
