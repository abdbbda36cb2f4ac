use serde::{Deserialize, Serialize};

/// Minutes between appearances recorded by `setup`.
pub const DEFAULT_SPAWN_FREQUENCY_MINUTES: u32 = 10;

/// Per-guild appearance settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildConfig {
    #[serde(rename = "crab_channel", default)]
    pub channel_id: Option<u64>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "crab_frequency", default = "default_frequency")]
    pub frequency_minutes: u32,
}

impl Default for GuildConfig {
    fn default() -> Self {
        Self {
            channel_id: None,
            enabled: false,
            frequency_minutes: DEFAULT_SPAWN_FREQUENCY_MINUTES,
        }
    }
}

impl GuildConfig {
    /// Channel that should receive appearances, if spawning is active.
    pub fn spawn_channel(&self) -> Option<u64> {
        if self.enabled { self.channel_id } else { None }
    }
}

fn default_frequency() -> u32 {
    DEFAULT_SPAWN_FREQUENCY_MINUTES
}

#[cfg(test)]
mod tests {
    use super::GuildConfig;

    #[test]
    fn reads_legacy_document_keys() {
        let config: GuildConfig = serde_json::from_str(
            r#"{ "crab_channel": 123, "enabled": true, "crab_frequency": 10 }"#,
        )
        .unwrap();

        assert_eq!(config.channel_id, Some(123));
        assert!(config.enabled);
        assert_eq!(config.frequency_minutes, 10);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: GuildConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GuildConfig::default());
    }

    #[test]
    fn disabled_guild_has_no_spawn_channel() {
        let config = GuildConfig {
            channel_id: Some(5),
            enabled: false,
            ..GuildConfig::default()
        };
        assert_eq!(config.spawn_channel(), None);
    }
}
