use clap::Subcommand;
use scholia_client::types::DoubtRequest;
use scholia_core::{
  doubt::{Doubt, DoubtStatus, NewDoubt},
  store::DoubtStore as _,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::App;

#[derive(Subcommand, Debug)]
pub enum DoubtCommand {
  /// Record a student's question for the teacher.
  Ask {
    #[arg(long)]
    student:  String,
    #[arg(long)]
    subject:  String,
    #[arg(long)]
    question: String,
    #[arg(long)]
    lesson:   Option<String>,
    /// Also forward the doubt to the backend.
    #[arg(long)]
    send:     bool,
  },
  List {
    /// Only unanswered doubts, oldest first.
    #[arg(long)]
    pending: bool,
  },
  Answer { id: Uuid, answer: String },
  Delete { id: Uuid },
}

impl DoubtCommand {
  pub async fn run(self, app: &App) -> anyhow::Result<()> {
    let store = &app.doubts;
    match self {
      Self::Ask { student, subject, question, lesson, send } => {
        let draft = NewDoubt {
          student_name: student,
          subject,
          question,
          lesson_id: lesson,
        };
        let request = DoubtRequest::from(&draft);
        let doubt = store.add_doubt(draft).await?;
        info!(id = %doubt.id, "doubt recorded");
        print_doubt(&doubt);

        if send {
          match app.api.submit_doubt(&request, &app.cancel).await {
            Ok(remote) => println!("Sent to the teacher (reference {remote})."),
            Err(e) => {
              warn!(error = %e, "doubt kept locally only");
              return Err(e.into());
            }
          }
        }
      }
      Self::List { pending } => {
        let doubts = if pending {
          store.pending_doubts().await?
        } else {
          store.list_doubts().await?
        };
        if doubts.is_empty() {
          println!("No doubts.");
        }
        for d in &doubts {
          print_doubt(d);
        }
      }
      Self::Answer { id, answer } => {
        let doubt = store.answer_doubt(id, answer).await?;
        info!(%id, "doubt answered");
        print_doubt(&doubt);
      }
      Self::Delete { id } => match store.delete_doubt(id).await? {
        Some(_) => println!("Deleted doubt {id}."),
        None => println!("No doubt {id}."),
      },
    }
    Ok(())
  }
}

fn print_doubt(d: &Doubt) {
  let status = match d.status {
    DoubtStatus::Pending => "pending",
    DoubtStatus::Answered => "answered",
  };
  println!(
    "{}  [{status}]  {} ({}): {}",
    d.id, d.student_name, d.subject, d.question
  );
  if let Some(answer) = &d.answer {
    println!("    -> {answer}");
  }
}
