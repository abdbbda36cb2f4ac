use tracing::warn;

use crate::database::Database;
use crate::model::GuildConfig;
use crate::model::guild::DEFAULT_SPAWN_FREQUENCY_MINUTES;

pub async fn get_guild_config(db: &Database, guild_id: u64) -> GuildConfig {
    db.guilds()
        .get(&guild_id.to_string())
        .await
        .unwrap_or_default()
}

/// Point appearances at `channel_id` and enable them. Replaces whatever the
/// guild had configured before.
pub async fn set_spawn_channel(
    db: &Database,
    guild_id: u64,
    channel_id: u64,
) -> anyhow::Result<GuildConfig> {
    db.guilds()
        .update(&guild_id.to_string(), GuildConfig::default, |config| {
            *config = GuildConfig {
                channel_id: Some(channel_id),
                enabled: true,
                frequency_minutes: DEFAULT_SPAWN_FREQUENCY_MINUTES,
            };
            config.clone()
        })
        .await
}

/// Turn appearances off for a guild, keeping its channel on record.
pub async fn disable_spawning(db: &Database, guild_id: u64) -> anyhow::Result<()> {
    db.guilds()
        .update(&guild_id.to_string(), GuildConfig::default, |config| {
            config.enabled = false;
        })
        .await
}

/// Guilds that currently want appearances, with their target channel.
pub async fn spawn_targets(db: &Database) -> Vec<(u64, u64)> {
    let mut targets = Vec::new();

    for (key, config) in db.guilds().entries().await {
        let Some(channel_id) = config.spawn_channel() else {
            continue;
        };

        match key.parse::<u64>() {
            Ok(guild_id) => targets.push((guild_id, channel_id)),
            Err(_) => warn!(guild_key = %key, "skipping guild config with non-numeric id"),
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::{disable_spawning, get_guild_config, set_spawn_channel, spawn_targets};
    use crate::database::Database;
    use crate::store::tests::scratch_dir;

    #[tokio::test]
    async fn unknown_guild_reads_as_disabled_default() {
        let db = Database::open(scratch_dir("guild-default")).await.unwrap();
        let config = get_guild_config(&db, 1).await;

        assert!(!config.enabled);
        assert_eq!(config.channel_id, None);
    }

    #[tokio::test]
    async fn second_setup_overwrites_channel() {
        let dir = scratch_dir("guild-setup");
        let db = Database::open(&dir).await.unwrap();

        set_spawn_channel(&db, 10, 111).await.unwrap();
        set_spawn_channel(&db, 10, 222).await.unwrap();

        let reopened = Database::open(&dir).await.unwrap();
        let config = get_guild_config(&reopened, 10).await;
        assert_eq!(config.channel_id, Some(222));
        assert!(config.enabled);
        assert_eq!(config.frequency_minutes, 10);
    }

    #[tokio::test]
    async fn only_enabled_guilds_are_targets() {
        let db = Database::open(scratch_dir("guild-targets")).await.unwrap();

        set_spawn_channel(&db, 1, 11).await.unwrap();
        set_spawn_channel(&db, 2, 22).await.unwrap();
        disable_spawning(&db, 2).await.unwrap();

        assert_eq!(spawn_targets(&db).await, vec![(1, 11)]);
        assert_eq!(get_guild_config(&db, 2).await.channel_id, Some(22));
    }
}
