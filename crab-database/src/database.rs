use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use tracing::info;

use crate::model::{GuildConfig, UserProgress};
use crate::prompts::PromptRegistry;
use crate::store::JsonDocument;

pub const GUILDS_DOCUMENT: &str = "crab_guilds.json";
pub const USERS_DOCUMENT: &str = "crab_users.json";

/// Shared store handle passed across crates.
///
/// Cloning is cheap; all clones see the same documents and prompt registry.
#[derive(Clone, Debug)]
pub struct Database {
    guilds: Arc<JsonDocument<GuildConfig>>,
    users: Arc<JsonDocument<UserProgress>>,
    prompts: Arc<PromptRegistry>,
}

impl Database {
    /// Open (or start empty) the documents under `data_dir`, creating the
    /// directory if needed.
    pub async fn open(data_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("failed to create data dir `{}`", data_dir.display()))?;

        let guilds = JsonDocument::load(document_path(data_dir, GUILDS_DOCUMENT)).await?;
        let users = JsonDocument::load(document_path(data_dir, USERS_DOCUMENT)).await?;

        Ok(Self {
            guilds: Arc::new(guilds),
            users: Arc::new(users),
            prompts: Arc::new(PromptRegistry::new()),
        })
    }

    pub fn guilds(&self) -> &JsonDocument<GuildConfig> {
        &self.guilds
    }

    pub fn users(&self) -> &JsonDocument<UserProgress> {
        &self.users
    }

    pub fn prompts(&self) -> &PromptRegistry {
        &self.prompts
    }

    /// Write both documents back to disk.
    pub async fn flush(&self) -> anyhow::Result<()> {
        self.guilds.save().await?;
        self.users.save().await?;
        info!(
            guilds = self.guilds.len().await,
            users = self.users.len().await,
            "store flushed"
        );
        Ok(())
    }
}

fn document_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(name)
}
