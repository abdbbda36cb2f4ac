use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, bail};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_SPAWN_INTERVAL_MINUTES: u64 = 10;
pub const DEFAULT_SPAWN_CHANCE: f64 = 0.7;

/// Process configuration, read once from the environment at startup.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub token: String,
    /// Register commands in this guild only (faster iteration) instead of globally.
    pub guild_id: Option<u64>,
    pub http_proxy: Option<String>,
    pub data_dir: PathBuf,
    pub spawn_interval: Duration,
    pub spawn_chance: f64,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let token = non_empty("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;

        let guild_id = non_empty("DISCORD_GUILD_ID")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("DISCORD_GUILD_ID is not a valid id")?;

        let spawn_interval_minutes = non_empty("CRAB_SPAWN_INTERVAL_MINUTES")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("CRAB_SPAWN_INTERVAL_MINUTES is not a whole number")?
            .unwrap_or(DEFAULT_SPAWN_INTERVAL_MINUTES);
        if spawn_interval_minutes == 0 {
            bail!("CRAB_SPAWN_INTERVAL_MINUTES must be at least 1");
        }

        let spawn_interval_secs = spawn_interval_minutes
            .checked_mul(60)
            .context("CRAB_SPAWN_INTERVAL_MINUTES is too large")?;

        let spawn_chance = non_empty("CRAB_SPAWN_CHANCE")
            .map(|raw| raw.parse::<f64>())
            .transpose()
            .context("CRAB_SPAWN_CHANCE is not a number")?
            .unwrap_or(DEFAULT_SPAWN_CHANCE);
        if !spawn_chance.is_finite() {
            bail!("CRAB_SPAWN_CHANCE must be a finite number");
        }
        let spawn_chance = spawn_chance.clamp(0.0, 1.0);

        Ok(Self {
            token,
            guild_id,
            http_proxy: non_empty("DISCORD_PROXY_URL"),
            data_dir: non_empty("CRAB_DATA_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            spawn_interval: Duration::from_secs(spawn_interval_secs),
            spawn_chance,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{BotConfig, DEFAULT_SPAWN_CHANCE};

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<BotConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_token_fails() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("DISCORD_TOKEN", "   ")]).is_err());
    }

    #[test]
    fn defaults_apply() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.guild_id, None);
        assert_eq!(config.http_proxy, None);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.spawn_interval, Duration::from_secs(600));
        assert_eq!(config.spawn_chance, DEFAULT_SPAWN_CHANCE);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_GUILD_ID", "1234"),
            ("DISCORD_PROXY_URL", "http://localhost:7878"),
            ("CRAB_DATA_DIR", "/var/lib/crab"),
            ("CRAB_SPAWN_INTERVAL_MINUTES", "3"),
            ("CRAB_SPAWN_CHANCE", "1.5"),
        ])
        .unwrap();

        assert_eq!(config.guild_id, Some(1234));
        assert_eq!(config.http_proxy.as_deref(), Some("http://localhost:7878"));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/crab"));
        assert_eq!(config.spawn_interval, Duration::from_secs(180));
        assert_eq!(config.spawn_chance, 1.0);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(config_from(&[("DISCORD_TOKEN", "abc"), ("DISCORD_GUILD_ID", "x")]).is_err());
        assert!(
            config_from(&[
                ("DISCORD_TOKEN", "abc"),
                ("CRAB_SPAWN_INTERVAL_MINUTES", "0")
            ])
            .is_err()
        );
        assert!(
            config_from(&[
                ("DISCORD_TOKEN", "abc"),
                ("CRAB_SPAWN_INTERVAL_MINUTES", "307445734561825861")
            ])
            .is_err()
        );
        assert!(
            config_from(&[
                ("DISCORD_TOKEN", "abc"),
                ("CRAB_SPAWN_CHANCE", "seventy percent")
            ])
            .is_err()
        );
        assert!(config_from(&[("DISCORD_TOKEN", "abc"), ("CRAB_SPAWN_CHANCE", "NaN")]).is_err());
        assert!(config_from(&[("DISCORD_TOKEN", "abc"), ("CRAB_SPAWN_CHANCE", "inf")]).is_err());
    }

    #[test]
    fn chance_below_zero_is_clamped() {
        let config =
            config_from(&[("DISCORD_TOKEN", "abc"), ("CRAB_SPAWN_CHANCE", "-0.5")]).unwrap();
        assert_eq!(config.spawn_chance, 0.0);
    }
}
