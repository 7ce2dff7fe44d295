//! The signed-in user's profile, academics, calendar and privacy choices.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ValidationError, annotation::unique_id, snapshot::Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Student,
  Teacher,
  Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:    String,
  pub name:  String,
  pub email: String,
  pub role:  Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Academics {
  pub school:   Option<String>,
  pub grade:    Option<String>,
  /// Examination board, e.g. "CBSE".
  pub board:    Option<String>,
  #[serde(default)]
  pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
  Exam,
  Assignment,
  Class,
  #[default]
  Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
  pub id:    Uuid,
  pub title: String,
  pub date:  NaiveDate,
  #[serde(default)]
  pub kind:  EventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
  pub profile_visible: bool,
  pub share_progress:  bool,
  pub allow_analytics: bool,
}

impl Default for PrivacySettings {
  fn default() -> Self {
    Self { profile_visible: true, share_progress: false, allow_analytics: false }
  }
}

/// Everything stored under `user-storage`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
  pub user:             Option<User>,
  #[serde(default)]
  pub academics:        Academics,
  #[serde(default)]
  pub calendar:         Vec<CalendarEvent>,
  #[serde(default)]
  pub privacy_settings: PrivacySettings,
  #[serde(default)]
  pub is_authenticated: bool,
}

impl UserState {
  pub fn sign_in(&mut self, user: User) {
    self.user = Some(user);
    self.is_authenticated = true;
  }

  /// Forget everything, including academics and calendar.
  pub fn sign_out(&mut self) { *self = Self::default(); }

  pub fn role(&self) -> Option<Role> { self.user.as_ref().map(|u| u.role) }

  pub fn set_academics(&mut self, academics: Academics) {
    self.academics = academics;
  }

  pub fn set_privacy(&mut self, settings: PrivacySettings) {
    self.privacy_settings = settings;
  }

  pub fn add_event(
    &mut self,
    title: impl Into<String>,
    date: NaiveDate,
    kind: EventKind,
  ) -> Result<CalendarEvent, ValidationError> {
    let title = title.into();
    if title.trim().is_empty() {
      return Err(ValidationError::EmptyTitle);
    }
    let event = CalendarEvent {
      id: unique_id(|id| self.calendar.iter().any(|e| e.id == id)),
      title,
      date,
      kind,
    };
    self.calendar.push(event.clone());
    Ok(event)
  }

  pub fn remove_event(&mut self, id: Uuid) -> Option<CalendarEvent> {
    let idx = self.calendar.iter().position(|e| e.id == id)?;
    Some(self.calendar.remove(idx))
  }

  /// Events on or after `from`, soonest first.
  pub fn upcoming(&self, from: NaiveDate) -> Vec<&CalendarEvent> {
    let mut events: Vec<_> =
      self.calendar.iter().filter(|e| e.date >= from).collect();
    events.sort_by_key(|e| e.date);
    events
  }
}

impl Snapshot for UserState {
  const STORAGE_KEY: &'static str = "user-storage";

  /// A user without a session is not authenticated.
  fn normalize(&mut self) {
    if self.user.is_none() {
      self.is_authenticated = false;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn student() -> User {
    User {
      id:    "u-1".into(),
      name:  "Asha".into(),
      email: "asha@example.com".into(),
      role:  Role::Student,
    }
  }

  #[test]
  fn sign_out_resets_everything() {
    let mut state = UserState::default();
    state.sign_in(student());
    state.add_event("Algebra test", date(2026, 11, 2), EventKind::Exam).unwrap();
    state.set_privacy(PrivacySettings { allow_analytics: true, ..Default::default() });
    assert_eq!(state.role(), Some(Role::Student));

    state.sign_out();
    assert_eq!(state, UserState::default());
    assert!(!state.is_authenticated);
  }

  #[test]
  fn upcoming_filters_and_sorts() {
    let mut state = UserState::default();
    state.add_event("late", date(2026, 12, 1), EventKind::Class).unwrap();
    state.add_event("past", date(2026, 1, 1), EventKind::Other).unwrap();
    state.add_event("soon", date(2026, 10, 20), EventKind::Assignment).unwrap();

    let titles: Vec<_> = state
      .upcoming(date(2026, 10, 18))
      .iter()
      .map(|e| e.title.as_str())
      .collect();
    assert_eq!(titles, ["soon", "late"]);
  }

  #[test]
  fn blank_event_title_rejected() {
    let mut state = UserState::default();
    let err = state.add_event(" ", date(2026, 1, 1), EventKind::Exam).unwrap_err();
    assert_eq!(err, ValidationError::EmptyTitle);
    assert!(state.calendar.is_empty());
  }

  #[test]
  fn remove_event_is_noop_when_absent() {
    let mut state = UserState::default();
    let e = state.add_event("x", date(2026, 1, 1), EventKind::Exam).unwrap();
    assert!(state.remove_event(e.id).is_some());
    assert!(state.remove_event(e.id).is_none());
  }

  #[test]
  fn persisted_shape_matches_user_storage() {
    let mut state = UserState::default();
    state.sign_in(student());
    let json = serde_json::to_value(&state).unwrap();
    for key in ["user", "academics", "calendar", "privacySettings", "isAuthenticated"] {
      assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["user"]["role"], "student");
    assert_eq!(json["privacySettings"]["profileVisible"], true);
  }

  #[test]
  fn normalize_clears_orphan_authentication() {
    let mut state = UserState { is_authenticated: true, ..Default::default() };
    state.normalize();
    assert!(!state.is_authenticated);
  }
}
