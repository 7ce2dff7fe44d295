//! Student doubts as seen from a teacher's inbox.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result, ValidationError, annotation::unique_id, snapshot::Snapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoubtStatus {
  #[default]
  Pending,
  Answered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doubt {
  pub id:           Uuid,
  pub student_name: String,
  pub subject:      String,
  pub question:     String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lesson_id:    Option<String>,
  #[serde(default)]
  pub status:       DoubtStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub answer:       Option<String>,
  pub created_at:   DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub answered_at:  Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewDoubt {
  pub student_name: String,
  pub subject:      String,
  pub question:     String,
  pub lesson_id:    Option<String>,
}

/// The teacher's doubt inbox. Persisted as `{ "doubts": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoubtBoard {
  doubts: Vec<Doubt>,
}

impl DoubtBoard {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, input: NewDoubt) -> Result<Doubt, ValidationError> {
    if input.question.trim().is_empty() {
      return Err(ValidationError::EmptyQuestion);
    }
    if input.student_name.trim().is_empty() {
      return Err(ValidationError::MissingStudentName);
    }
    let doubt = Doubt {
      id:           unique_id(|id| self.get(id).is_some()),
      student_name: input.student_name,
      subject:      input.subject,
      question:     input.question,
      lesson_id:    input.lesson_id,
      status:       DoubtStatus::Pending,
      answer:       None,
      created_at:   Utc::now(),
      answered_at:  None,
    };
    self.doubts.push(doubt.clone());
    Ok(doubt)
  }

  pub fn get(&self, id: Uuid) -> Option<&Doubt> {
    self.doubts.iter().find(|d| d.id == id)
  }

  pub fn all(&self) -> &[Doubt] { &self.doubts }

  /// Unanswered doubts, oldest first.
  pub fn pending(&self) -> Vec<&Doubt> {
    let mut pending: Vec<_> = self
      .doubts
      .iter()
      .filter(|d| d.status == DoubtStatus::Pending)
      .collect();
    pending.sort_by_key(|d| d.created_at);
    pending
  }

  /// Record the teacher's answer. Answering again replaces the answer.
  pub fn answer(&mut self, id: Uuid, answer: impl Into<String>) -> Result<Doubt> {
    let answer = answer.into();
    if answer.trim().is_empty() {
      return Err(ValidationError::EmptyAnswer.into());
    }
    let doubt = self
      .doubts
      .iter_mut()
      .find(|d| d.id == id)
      .ok_or(Error::DoubtNotFound(id))?;
    doubt.status = DoubtStatus::Answered;
    doubt.answer = Some(answer);
    doubt.answered_at = Some(Utc::now());
    Ok(doubt.clone())
  }

  pub fn delete(&mut self, id: Uuid) -> Option<Doubt> {
    let idx = self.doubts.iter().position(|d| d.id == id)?;
    Some(self.doubts.remove(idx))
  }
}

impl Snapshot for DoubtBoard {
  const STORAGE_KEY: &'static str = "teacher-doubts-storage";

  fn normalize(&mut self) {
    let mut seen = std::collections::HashSet::new();
    self.doubts.retain(|d| seen.insert(d.id));
  }
}
