//! Subcommands and their dispatch.

mod annotations;
mod backend;
mod doubts;
mod notes;
mod profile;

use std::path::PathBuf;

use clap::Subcommand;

use self::{
  annotations::AnnotationCommand, backend::TestCommand, doubts::DoubtCommand,
  notes::NoteCommand, profile::ProfileCommand,
};
use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Page annotations: notes and saved AI answers.
  #[command(subcommand)]
  Annotations(AnnotationCommand),
  /// Free-standing study notes.
  #[command(subcommand)]
  Notes(NoteCommand),
  /// The teacher's doubt inbox.
  #[command(subcommand)]
  Doubts(DoubtCommand),
  /// Account, academics, calendar and privacy.
  #[command(subcommand)]
  Profile(ProfileCommand),
  /// List lessons on the backend.
  Lessons,
  /// Ask a question answered from the indexed lessons.
  Ask {
    question: String,
    #[arg(long)]
    lesson:   Option<String>,
    /// Number of passages to retrieve.
    #[arg(long)]
    top_k:    Option<u32>,
  },
  /// Upload a PDF to be indexed as a lesson.
  Upload {
    file:  PathBuf,
    #[arg(long)]
    title: Option<String>,
  },
  /// Timed tests.
  #[command(subcommand)]
  Test(TestCommand),
}

impl Command {
  pub async fn run(self, app: &App) -> anyhow::Result<()> {
    match self {
      Self::Annotations(cmd) => cmd.run(app).await,
      Self::Notes(cmd) => cmd.run(app).await,
      Self::Doubts(cmd) => cmd.run(app).await,
      Self::Profile(cmd) => cmd.run(app).await,
      Self::Lessons => backend::lessons(app).await,
      Self::Ask { question, lesson, top_k } => {
        backend::ask(app, question, lesson, top_k).await
      }
      Self::Upload { file, title } => backend::upload(app, file, title).await,
      Self::Test(cmd) => cmd.run(app).await,
    }
  }
}
