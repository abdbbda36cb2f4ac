pub mod coins;
pub mod embeds;
pub mod forcespawn;
pub mod forget;
pub mod leaderboard;
pub mod profile;
pub mod setup;
