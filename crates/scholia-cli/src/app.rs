//! Shared state for one CLI invocation.

use anyhow::Context as _;
use scholia_client::ApiClient;
use scholia_store::{Annotations, Doubts, Notes, Profile, SqliteStorage};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::settings::Settings;

/// The four local stores, all sharing one SQLite file, plus the backend
/// client and the token Ctrl-C cancels.
pub struct App {
  pub annotations: Annotations<SqliteStorage>,
  pub notes:       Notes<SqliteStorage>,
  pub doubts:      Doubts<SqliteStorage>,
  pub profile:     Profile<SqliteStorage>,
  pub api:         ApiClient,
  pub cancel:      CancellationToken,
}

impl App {
  pub async fn open(settings: &Settings, cancel: CancellationToken) -> anyhow::Result<Self> {
    let path = &settings.data_path;
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let storage = SqliteStorage::open(path)
      .await
      .with_context(|| format!("failed to open store at {}", path.display()))?;
    debug!(path = %path.display(), "opened local store");

    Self::with_storage(storage, settings, cancel).await
  }

  pub async fn with_storage(
    storage: SqliteStorage,
    settings: &Settings,
    cancel: CancellationToken,
  ) -> anyhow::Result<Self> {
    Ok(Self {
      annotations: Annotations::open(storage.clone())
        .await
        .context("failed to load annotations")?,
      notes: Notes::open(storage.clone()).await.context("failed to load notes")?,
      doubts: Doubts::open(storage.clone()).await.context("failed to load doubts")?,
      profile: Profile::open(storage).await.context("failed to load profile")?,
      api: ApiClient::new(settings.api_config())?,
      cancel,
    })
  }
}
