use chrono::{Local, NaiveDate};
use clap::{Subcommand, ValueEnum};
use scholia_core::{
  profile::{Academics, EventKind, PrivacySettings, Role, User},
  store::ProfileStore as _,
};
use tracing::info;
use uuid::Uuid;

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
  Show,
  SignIn {
    #[arg(long)]
    id:    String,
    #[arg(long)]
    name:  String,
    #[arg(long)]
    email: String,
    #[arg(long, value_enum, default_value_t = RoleArg::Student)]
    role:  RoleArg,
  },
  /// Forget the user together with their academics, calendar and privacy
  /// choices.
  SignOut,
  Academics {
    #[arg(long)]
    school:  Option<String>,
    #[arg(long)]
    grade:   Option<String>,
    #[arg(long)]
    board:   Option<String>,
    /// Repeat for each subject.
    #[arg(long = "subject")]
    subjects: Vec<String>,
  },
  AddEvent {
    title: String,
    /// YYYY-MM-DD
    date:  NaiveDate,
    #[arg(long, value_enum, default_value_t = EventKindArg::Other)]
    kind:  EventKindArg,
  },
  RemoveEvent { id: Uuid },
  /// Upcoming calendar events, soonest first.
  Events {
    /// Defaults to today.
    #[arg(long)]
    from: Option<NaiveDate>,
  },
  /// Change privacy switches; omitted ones keep their value.
  Privacy {
    #[arg(long)]
    profile_visible: Option<bool>,
    #[arg(long)]
    share_progress:  Option<bool>,
    #[arg(long)]
    allow_analytics: Option<bool>,
  },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RoleArg {
  Student,
  Teacher,
  Admin,
}

impl From<RoleArg> for Role {
  fn from(r: RoleArg) -> Self {
    match r {
      RoleArg::Student => Self::Student,
      RoleArg::Teacher => Self::Teacher,
      RoleArg::Admin => Self::Admin,
    }
  }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum EventKindArg {
  Exam,
  Assignment,
  Class,
  Other,
}

impl From<EventKindArg> for EventKind {
  fn from(k: EventKindArg) -> Self {
    match k {
      EventKindArg::Exam => Self::Exam,
      EventKindArg::Assignment => Self::Assignment,
      EventKindArg::Class => Self::Class,
      EventKindArg::Other => Self::Other,
    }
  }
}

impl ProfileCommand {
  pub async fn run(self, app: &App) -> anyhow::Result<()> {
    let store = &app.profile;
    match self {
      Self::Show => {
        let state = store.profile().await?;
        match (&state.user, state.role()) {
          (Some(user), Some(role)) if state.is_authenticated => {
            println!("{} <{}> ({role:?})", user.name, user.email);
          }
          _ => println!("Signed out."),
        }
        let a = &state.academics;
        for (label, value) in [("School", &a.school), ("Grade", &a.grade), ("Board", &a.board)] {
          if let Some(value) = value {
            println!("{label}: {value}");
          }
        }
        if !a.subjects.is_empty() {
          println!("Subjects: {}", a.subjects.join(", "));
        }
        print_privacy(&state.privacy_settings);
        println!("{} calendar event(s).", state.calendar.len());
      }
      Self::SignIn { id, name, email, role } => {
        store
          .sign_in(User { id, name, email, role: role.into() })
          .await?;
        info!("signed in");
        println!("Signed in.");
      }
      Self::SignOut => {
        store.sign_out().await?;
        info!("signed out");
        println!("Signed out; local profile cleared.");
      }
      Self::Academics { school, grade, board, subjects } => {
        store
          .set_academics(Academics { school, grade, board, subjects })
          .await?;
        println!("Academics updated.");
      }
      Self::AddEvent { title, date, kind } => {
        let event = store.add_event(title, date, kind.into()).await?;
        println!("{}  {}  {}", event.id, event.date, event.title);
      }
      Self::RemoveEvent { id } => match store.remove_event(id).await? {
        Some(event) => println!("Removed \"{}\".", event.title),
        None => println!("No event {id}."),
      },
      Self::Events { from } => {
        let from = from.unwrap_or_else(|| Local::now().date_naive());
        let events = store.upcoming_events(from).await?;
        if events.is_empty() {
          println!("Nothing scheduled from {from}.");
        }
        for e in &events {
          println!("{}  {:<10}  {}  ({})", e.date, format!("{:?}", e.kind), e.title, e.id);
        }
      }
      Self::Privacy { profile_visible, share_progress, allow_analytics } => {
        let mut settings = store.profile().await?.privacy_settings;
        if let Some(v) = profile_visible {
          settings.profile_visible = v;
        }
        if let Some(v) = share_progress {
          settings.share_progress = v;
        }
        if let Some(v) = allow_analytics {
          settings.allow_analytics = v;
        }
        store.set_privacy(settings).await?;
        print_privacy(&settings);
      }
    }
    Ok(())
  }
}

fn print_privacy(p: &PrivacySettings) {
  println!(
    "Privacy: profile visible {}, share progress {}, analytics {}",
    p.profile_visible, p.share_progress, p.allow_analytics
  );
}
