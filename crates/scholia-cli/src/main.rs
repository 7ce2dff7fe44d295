//! `scholia`, the command-line front end for the Scholia study stores.
//!
//! Local stores (annotations, notes, doubts, profile) live in one SQLite
//! file; lessons, questions, uploads and tests go to the backend.
//!
//! # Usage
//!
//! ```text
//! scholia notes add --title "Cells" --content "Mitochondria make ATP"
//! scholia annotations add-ai --lesson bio-1 --page 4 --text "osmosis" --action define
//! scholia --config ./scholia.toml test take t-12
//! ```
//!
//! Settings come from `~/.config/scholia/config.toml` (or `--config`),
//! overridden by `SCHOLIA_DATA_PATH`, `SCHOLIA_API_URL`, `SCHOLIA_API_KEY`
//! and `SCHOLIA_TIMEOUT_SECS`.

mod app;
mod commands;
mod settings;

use std::path::PathBuf;

use clap::Parser;
use scholia_client::ClientError;
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{app::App, commands::Command, settings::Settings};

#[derive(Parser, Debug)]
#[command(
  name = "scholia",
  version,
  about = "Study notes, annotations and lessons from the terminal"
)]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = settings::DEFAULT_CONFIG_PATH)]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let cancel = CancellationToken::new();
  tokio::spawn({
    let cancel = cancel.clone();
    async move {
      if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("interrupted; cancelling");
        cancel.cancel();
      }
    }
  });

  if let Err(err) = run(cli, cancel).await {
    eprintln!("error: {err:#}");
    // Exit without waiting on a stdin read still parked on the blocking pool.
    std::process::exit(exit_code(&err));
  }
}

/// 130 when the failure traces back to a cancelled call, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> i32 {
  let cancelled = err.chain().any(|e| {
    matches!(e.downcast_ref::<ClientError>(), Some(ClientError::Cancelled))
  });
  if cancelled { 130 } else { 1 }
}

async fn run(cli: Cli, cancel: CancellationToken) -> anyhow::Result<()> {
  let settings = Settings::load(&cli.config)?;
  let app = App::open(&settings, cancel).await?;
  cli.command.run(&app).await
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory as _;

  use super::*;

  #[test]
  fn cli_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn parses_nested_commands() {
    let cli = Cli::try_parse_from([
      "scholia",
      "annotations",
      "add-ai",
      "--lesson",
      "bio-1",
      "--page",
      "3",
      "--text",
      "osmosis",
      "--action",
      "stick_flow",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Annotations(_)));

    let cli =
      Cli::try_parse_from(["scholia", "test", "submit", "t1", "--answer", "q1=B"]).unwrap();
    assert!(matches!(cli.command, Command::Test(_)));
  }

  #[test]
  fn cancelled_calls_exit_with_130() {
    use anyhow::Context as _;

    let direct = anyhow::Error::new(ClientError::Cancelled);
    let wrapped = Err::<(), _>(ClientError::Cancelled)
      .context("define request failed")
      .unwrap_err();
    let other = anyhow::anyhow!("no config").context("failed to start");
    assert_eq!(exit_code(&direct), 130);
    assert_eq!(exit_code(&wrapped), 130);
    assert_eq!(exit_code(&other), 1);
  }

  #[test]
  fn rejects_unknown_ai_action() {
    let parsed = Cli::try_parse_from([
      "scholia", "annotations", "add-ai", "--lesson", "l", "--page", "1", "--text", "t",
      "--action", "poem",
    ]);
    assert!(parsed.is_err());
  }

  async fn exec(settings: &Settings, args: &[&str]) -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(std::iter::once("scholia").chain(args.iter().copied()))?;
    let app = App::open(settings, CancellationToken::new()).await?;
    cli.command.run(&app).await
  }

  #[tokio::test]
  async fn local_commands_persist_between_runs() {
    use scholia_core::store::{DoubtStore as _, NoteStore as _};

    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
      data_path: dir.path().join("nested").join("scholia.db"),
      ..Settings::default()
    };

    exec(&settings, &["notes", "add", "--title", "Cells", "--content", "ATP"])
      .await
      .unwrap();
    exec(&settings, &[
      "doubts", "ask", "--student", "Ada", "--subject", "Math", "--question", "Why?",
    ])
    .await
    .unwrap();
    assert!(exec(&settings, &["notes", "add"]).await.is_err());

    let app = App::open(&settings, CancellationToken::new()).await.unwrap();
    let notes = app.notes.search_notes("cells").await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "ATP");
    assert_eq!(app.doubts.pending_doubts().await.unwrap().len(), 1);
  }

  #[test]
  fn half_a_position_is_rejected() {
    let parsed = Cli::try_parse_from([
      "scholia", "annotations", "add-note", "--lesson", "l", "--page", "1", "--text", "t",
      "--x", "10",
    ]);
    assert!(parsed.is_err());
  }
}
