//! Error type for `scholia-client`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  /// The request never produced a response (DNS, connect, timeout, …).
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// The backend answered with a non-success status.
  #[error("{status}: {message}")]
  Api { status: StatusCode, message: String },

  /// A success response whose body did not have the expected shape.
  #[error("unexpected response body: {0}")]
  Decode(#[source] reqwest::Error),

  #[error("request cancelled")]
  Cancelled,
}

impl ClientError {
  /// Whether trying the same call again later could succeed.
  pub fn is_transient(&self) -> bool {
    match self {
      Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
      Self::Api { status, .. } => {
        status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
      }
      Self::Build(_) | Self::Decode(_) | Self::Cancelled => false,
    }
  }

  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Api { status, .. } => Some(*status),
      Self::Transport(e) | Self::Decode(e) | Self::Build(e) => e.status(),
      Self::Cancelled => None,
    }
  }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Best-effort human message from an error response body.
///
/// Understands FastAPI's `{"detail": "..."}` and validation-error
/// `{"detail": [{"msg": "..."}, ...]}` shapes plus plain `message`/`error`
/// fields. Falls back to the status's canonical reason.
pub fn error_message(status: StatusCode, body: &str) -> String {
  let from_body = serde_json::from_str::<serde_json::Value>(body)
    .ok()
    .and_then(|json| message_from_json(&json));

  from_body.unwrap_or_else(|| {
    status
      .canonical_reason()
      .map(str::to_owned)
      .unwrap_or_else(|| status.as_str().to_owned())
  })
}

fn message_from_json(json: &serde_json::Value) -> Option<String> {
  match json.get("detail") {
    Some(serde_json::Value::String(s)) if !s.is_empty() => {
      return Some(s.clone());
    }
    Some(serde_json::Value::Array(items)) => {
      let msgs: Vec<&str> = items
        .iter()
        .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
        .collect();
      if !msgs.is_empty() {
        return Some(msgs.join("; "));
      }
    }
    _ => {}
  }

  ["message", "error"]
    .iter()
    .find_map(|key| json.get(*key).and_then(serde_json::Value::as_str))
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detail_string_wins() {
    let msg = error_message(
      StatusCode::NOT_FOUND,
      r#"{"detail":"Lesson not found","message":"ignored"}"#,
    );
    assert_eq!(msg, "Lesson not found");
  }

  #[test]
  fn validation_details_are_joined() {
    let body = r#"{"detail":[
      {"loc":["body","text"],"msg":"field required","type":"missing"},
      {"loc":["body","action"],"msg":"invalid action","type":"enum"}
    ]}"#;
    assert_eq!(
      error_message(StatusCode::UNPROCESSABLE_ENTITY, body),
      "field required; invalid action"
    );
  }

  #[test]
  fn message_and_error_fields_are_used() {
    assert_eq!(
      error_message(StatusCode::BAD_REQUEST, r#"{"message":"bad pdf"}"#),
      "bad pdf"
    );
    assert_eq!(
      error_message(StatusCode::BAD_REQUEST, r#"{"error":"quota"}"#),
      "quota"
    );
  }

  #[test]
  fn falls_back_to_status_text() {
    assert_eq!(
      error_message(StatusCode::BAD_GATEWAY, "<html>upstream</html>"),
      "Bad Gateway"
    );
    assert_eq!(
      error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail":""}"#),
      "Internal Server Error"
    );
  }

  #[test]
  fn transient_classification() {
    let server = ClientError::Api {
      status:  StatusCode::SERVICE_UNAVAILABLE,
      message: String::new(),
    };
    let client = ClientError::Api {
      status:  StatusCode::UNPROCESSABLE_ENTITY,
      message: String::new(),
    };
    assert!(server.is_transient());
    assert!(!client.is_transient());
    assert!(!ClientError::Cancelled.is_transient());
    assert_eq!(client.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
  }
}
