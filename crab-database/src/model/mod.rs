pub mod guild;
pub mod progress;

pub use guild::GuildConfig;
pub use progress::{CatchReward, UserProgress};
