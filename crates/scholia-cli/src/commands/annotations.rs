use anyhow::Context as _;
use clap::{Args, Subcommand, ValueEnum};
use scholia_client::types::AiActionRequest;
use scholia_core::{
  annotation::{
    AiAction, Annotation, AnnotationBody, AnnotationKind, NewAnnotation, Panel,
    Position, partition_by_kind,
  },
  layout::layout_page,
  store::AnnotationStore as _,
};
use tracing::info;
use uuid::Uuid;

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum AnnotationCommand {
  /// Attach a handwritten note to an excerpt.
  AddNote {
    #[command(flatten)]
    anchor:  Anchor,
    #[arg(long, default_value = "")]
    heading: String,
    #[arg(long, default_value = "")]
    content: String,
  },
  /// Ask the backend to act on an excerpt and keep its answer.
  AddAi {
    #[command(flatten)]
    anchor: Anchor,
    /// define, elaborate, stick_flow, simple, meaning, example, story or
    /// summary.
    #[arg(long)]
    action: AiAction,
  },
  /// List a lesson's annotations, optionally narrowed to one page.
  List {
    #[arg(long)]
    lesson: String,
    #[arg(long)]
    page:   Option<u32>,
    #[arg(long, value_enum)]
    kind:   Option<KindArg>,
  },
  Delete { id: Uuid },
  /// Show where each annotation on a page is drawn.
  Layout {
    #[arg(long)]
    lesson: String,
    #[arg(long)]
    page:   u32,
  },
  /// Open an annotation in a side panel for this session.
  Focus {
    id:    Option<Uuid>,
    #[arg(long, value_enum)]
    panel: Option<PanelArg>,
  },
}

/// Where an annotation lives and what it is attached to.
#[derive(Args, Debug)]
pub struct Anchor {
  #[arg(long)]
  lesson: String,
  #[arg(long)]
  page:   u32,
  /// The selected excerpt.
  #[arg(long)]
  text:   String,
  /// Explicit page position; both coordinates or neither.
  #[arg(long, requires = "y")]
  x:      Option<f64>,
  #[arg(long, requires = "x")]
  y:      Option<f64>,
}

impl Anchor {
  fn position(&self) -> Option<Position> {
    Some(Position { x: self.x?, y: self.y? })
  }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
  Note,
  Ai,
}

impl From<KindArg> for AnnotationKind {
  fn from(k: KindArg) -> Self {
    match k {
      KindArg::Note => Self::Note,
      KindArg::Ai => Self::Ai,
    }
  }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PanelArg {
  Notes,
  Ai,
}

impl From<PanelArg> for Panel {
  fn from(p: PanelArg) -> Self {
    match p {
      PanelArg::Notes => Self::Notes,
      PanelArg::Ai => Self::Ai,
    }
  }
}

impl AnnotationCommand {
  pub async fn run(self, app: &App) -> anyhow::Result<()> {
    let store = &app.annotations;
    match self {
      Self::AddNote { anchor, heading, content } => {
        let mut draft =
          NewAnnotation::note(&anchor.lesson, anchor.page, &anchor.text, heading, content);
        draft.position = anchor.position();
        let saved = store.add_annotation(draft).await?;
        info!(id = %saved.id, "annotation saved");
        print_annotation(&saved);
      }
      Self::AddAi { anchor, action } => {
        let request = AiActionRequest {
          text:        anchor.text.clone(),
          action,
          lesson_id:   anchor.lesson.clone(),
          page_number: anchor.page,
        };
        // Reject a bad draft before the backend call.
        let mut draft =
          NewAnnotation::ai(&anchor.lesson, anchor.page, &anchor.text, action, "");
        draft.position = anchor.position();
        draft.validate()?;

        let response = app
          .api
          .ai_action(&request, &app.cancel)
          .await
          .with_context(|| format!("{} request failed", action.label()))?;
        draft.body = AnnotationBody::Ai { action, response };
        let saved = store.add_annotation(draft).await?;
        info!(id = %saved.id, %action, "AI annotation saved");
        print_annotation(&saved);
      }
      Self::List { lesson, page, kind } => {
        let found = match page {
          Some(page) => store.get_annotations_by_page(&lesson, page).await?,
          None => store.get_annotations_by_lesson(&lesson).await?,
        };
        let (notes, ai) = partition_by_kind(&found);
        let sections = match kind.map(AnnotationKind::from) {
          Some(AnnotationKind::Note) => vec![("Notes", notes)],
          Some(AnnotationKind::Ai) => vec![("AI", ai)],
          None => vec![("Notes", notes), ("AI", ai)],
        };
        if sections.iter().all(|(_, list)| list.is_empty()) {
          println!("No annotations.");
        }
        for (title, list) in sections.into_iter().filter(|(_, list)| !list.is_empty()) {
          println!("{title}:");
          for a in list {
            print_annotation(a);
          }
        }
      }
      Self::Delete { id } => match store.delete_annotation(id).await? {
        Some(a) => {
          info!(%id, "annotation deleted");
          println!("Deleted annotation on page {} of {}.", a.page_number, a.lesson_id);
        }
        None => println!("No annotation {id}."),
      },
      Self::Layout { lesson, page } => {
        let found = store.get_annotations_by_page(&lesson, page).await?;
        let refs: Vec<&Annotation> = found.iter().collect();
        for (a, pos) in layout_page(&refs) {
          let placed = if a.position.is_some() { "stored" } else { "grid" };
          println!("{}  ({:.0}, {:.0})  {placed}  {}", a.id, pos.x, pos.y, summary(a));
        }
      }
      Self::Focus { id, panel } => {
        if let Some(id) = id
          && store.get_annotation(id).await?.is_none()
        {
          anyhow::bail!("no annotation {id}");
        }
        store.set_viewing_annotation(id).await;
        store.set_active_panel(panel.map(Panel::from)).await;
        let focus = store.focus().await;
        match focus.viewing {
          Some(id) => {
            let panel = match focus.active_panel {
              Some(Panel::Notes) => "notes",
              Some(Panel::Ai) => "AI",
              None => "no",
            };
            println!("Viewing {id} ({panel} panel)");
          }
          None => println!("Nothing in focus."),
        }
      }
    }
    Ok(())
  }
}

fn summary(a: &Annotation) -> String {
  match &a.body {
    AnnotationBody::Note { heading, content } if heading.is_empty() => content.clone(),
    AnnotationBody::Note { heading, .. } => heading.clone(),
    AnnotationBody::Ai { action, .. } => format!("[{}] {}", action.label(), a.text),
  }
}

fn print_annotation(a: &Annotation) {
  println!(
    "{}  {} p.{}  {}  {}",
    a.id,
    a.lesson_id,
    a.page_number,
    a.timestamp.format("%Y-%m-%d %H:%M"),
    summary(a)
  );
  if let AnnotationBody::Ai { response, .. } = &a.body {
    for line in response.lines() {
      println!("    {line}");
    }
  }
}
