pub mod catch;
pub mod guild_config;
pub mod progress;
