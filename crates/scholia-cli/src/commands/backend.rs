//! Commands that only talk to the backend.

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::Subcommand;
use scholia_client::{
  ClientError, Countdown, CountdownEnd, format_remaining,
  types::{AnswerChoice, QueryRequest, Question, TestPaper, TestSubmission},
};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing::{info, warn};

use crate::app::App;

pub async fn lessons(app: &App) -> anyhow::Result<()> {
  let lessons = app.api.list_lessons(&app.cancel).await?;
  if lessons.is_empty() {
    println!("No lessons uploaded yet.");
  }
  for l in &lessons {
    let subject = l.subject.as_deref().unwrap_or("-");
    println!("{:<24} {:<14} {:>4}p  {}", l.id, subject, l.page_count, l.title);
  }
  Ok(())
}

pub async fn ask(
  app: &App,
  question: String,
  lesson: Option<String>,
  top_k: Option<u32>,
) -> anyhow::Result<()> {
  let request = QueryRequest { question, lesson_id: lesson, top_k };
  let resp = app.api.ask(&request, &app.cancel).await?;
  println!("{}", resp.answer);
  if !resp.sources.is_empty() {
    println!();
    for s in &resp.sources {
      match s.page {
        Some(page) => println!("  p.{page}: {}", s.snippet),
        None => println!("  {}", s.snippet),
      }
    }
  }
  Ok(())
}

pub async fn upload(app: &App, file: PathBuf, title: Option<String>) -> anyhow::Result<()> {
  let bytes = tokio::fs::read(&file)
    .await
    .with_context(|| format!("failed to read {}", file.display()))?;
  let file_name = file
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| "document.pdf".to_owned());
  info!(file = %file_name, size = bytes.len(), "uploading");

  let resp = app
    .api
    .upload_document(&file_name, bytes, title.as_deref(), &app.cancel)
    .await?;
  println!("Indexed {} page(s) as lesson {}.", resp.pages, resp.lesson_id);
  Ok(())
}

#[derive(Subcommand, Debug)]
pub enum TestCommand {
  /// Answer a test interactively against its clock.
  Take { id: String },
  /// Submit answers given as `QUESTION_ID=ANSWER`.
  Submit {
    id:      String,
    #[arg(long = "answer", value_parser = parse_answer)]
    answers: Vec<AnswerChoice>,
  },
}

impl TestCommand {
  pub async fn run(self, app: &App) -> anyhow::Result<()> {
    match self {
      Self::Take { id } => take(app, &id).await,
      Self::Submit { id, answers } => submit(app, &id, TestSubmission { answers }).await,
    }
  }
}

fn parse_answer(raw: &str) -> Result<AnswerChoice, String> {
  let (question_id, answer) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected QUESTION_ID=ANSWER, got `{raw}`"))?;
  if question_id.trim().is_empty() {
    return Err("question id is empty".to_owned());
  }
  Ok(AnswerChoice {
    question_id: question_id.trim().to_owned(),
    answer:      answer.trim().to_owned(),
  })
}

/// A numeric reply picks the matching option; anything else is taken as
/// written.
fn resolve_answer(question: &Question, reply: &str) -> String {
  let reply = reply.trim();
  reply
    .parse::<usize>()
    .ok()
    .and_then(|n| n.checked_sub(1))
    .and_then(|i| question.options.get(i))
    .cloned()
    .unwrap_or_else(|| reply.to_owned())
}

fn print_question(n: usize, q: &Question) {
  println!("\n{n}. {}", q.prompt);
  for (i, opt) in q.options.iter().enumerate() {
    println!("   {}) {opt}", i + 1);
  }
}

async fn take(app: &App, id: &str) -> anyhow::Result<()> {
  let paper: TestPaper = app.api.get_test(id, &app.cancel).await?;
  println!("{} ({} min, {} questions)", paper.title, paper.duration_minutes, paper.questions.len());

  let countdown = Countdown::minutes(paper.duration_minutes);
  let clock_stop = app.cancel.child_token();
  let mut clock = tokio::spawn({
    let stop = clock_stop.clone();
    async move {
      countdown
        .run(Duration::from_secs(60), &stop, |left| {
          eprintln!("[{} left]", format_remaining(left));
        })
        .await
    }
  });

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut submission = TestSubmission::default();
  let mut timed_out = false;

  for (n, question) in paper.questions.iter().enumerate() {
    print_question(n + 1, question);
    tokio::select! {
      line = lines.next_line() => match line? {
        Some(reply) => submission.answers.push(AnswerChoice {
          question_id: question.id.clone(),
          answer:      resolve_answer(question, &reply),
        }),
        None => break,
      },
      end = &mut clock => {
        match end.context("countdown task failed")? {
          CountdownEnd::Expired => {
            warn!("time is up");
            timed_out = true;
          }
          CountdownEnd::Cancelled => return Err(abandoned()),
        }
        break;
      }
    }
  }
  clock_stop.cancel();

  if app.cancel.is_cancelled() {
    return Err(abandoned());
  }
  if timed_out {
    println!("\nTime is up; submitting {} answer(s).", submission.answers.len());
  }
  submit(app, &paper.id, submission).await
}

/// Interrupted mid-test; carries [`ClientError::Cancelled`] so the process
/// exits as cancelled.
fn abandoned() -> anyhow::Error {
  anyhow::Error::new(ClientError::Cancelled).context("test abandoned")
}

async fn submit(app: &App, id: &str, submission: TestSubmission) -> anyhow::Result<()> {
  let result = app.api.submit_test(id, &submission, &app.cancel).await?;
  info!(test = id, score = result.score, total = result.total, "test submitted");
  println!("Score: {} / {}", result.score, result.total);
  if let Some(feedback) = result.feedback {
    println!("{feedback}");
  }
  Ok(())
}
