use clap::{Subcommand, ValueEnum};
use scholia_core::{
  note::{NewNote, Note, NoteSource, NoteUpdate},
  store::NoteStore as _,
};
use tracing::info;
use uuid::Uuid;

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
  Add {
    #[arg(long, default_value = "")]
    title:   String,
    #[arg(long, default_value = "")]
    content: String,
    #[arg(long, value_enum, default_value_t = SourceArg::Manual)]
    source:  SourceArg,
  },
  List {
    #[arg(long, value_enum)]
    source: Option<SourceArg>,
  },
  /// Case-insensitive match on title or content.
  Search { query: String },
  /// Change the title and/or content; omitted fields stay as they are.
  Edit {
    id:      Uuid,
    #[arg(long)]
    title:   Option<String>,
    #[arg(long)]
    content: Option<String>,
  },
  Delete { id: Uuid },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceArg {
  Manual,
  Annotation,
  AiChat,
  Lesson,
}

impl From<SourceArg> for NoteSource {
  fn from(s: SourceArg) -> Self {
    match s {
      SourceArg::Manual => Self::Manual,
      SourceArg::Annotation => Self::Annotation,
      SourceArg::AiChat => Self::AiChat,
      SourceArg::Lesson => Self::Lesson,
    }
  }
}

impl NoteCommand {
  pub async fn run(self, app: &App) -> anyhow::Result<()> {
    let store = &app.notes;
    match self {
      Self::Add { title, content, source } => {
        let note = store
          .add_note(NewNote::new(title, content).from_source(source.into()))
          .await?;
        info!(id = %note.id, "note saved");
        print_note(&note);
      }
      Self::List { source } => {
        let source = source.map(NoteSource::from);
        let notes = store.list_notes().await?;
        print_all(notes.iter().filter(|n| source.is_none_or(|s| n.source == s)));
      }
      Self::Search { query } => {
        print_all(store.search_notes(&query).await?.iter());
      }
      Self::Edit { id, title, content } => {
        let note = store.update_note(id, NoteUpdate { title, content }).await?;
        info!(%id, "note updated");
        print_note(&note);
      }
      Self::Delete { id } => match store.delete_note(id).await? {
        Some(note) => {
          info!(%id, "note deleted");
          println!("Deleted \"{}\".", note.title);
        }
        None => println!("No note {id}."),
      },
    }
    Ok(())
  }
}

fn print_all<'a>(notes: impl Iterator<Item = &'a Note>) {
  let mut any = false;
  for note in notes {
    any = true;
    print_note(note);
  }
  if !any {
    println!("No notes.");
  }
}

fn print_note(note: &Note) {
  let title = if note.title.is_empty() { "(untitled)" } else { note.title.as_str() };
  println!("{}  {}  {title}", note.id, note.updated_at.format("%Y-%m-%d %H:%M"));
  for line in note.content.lines() {
    println!("    {line}");
  }
}
