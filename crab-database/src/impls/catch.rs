use tracing::info;

use crate::database::Database;
use crate::model::{CatchReward, UserProgress};
use crate::prompts::{ActivePrompt, Claim};

/// Result of a catch attempt on one prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatchResult {
    Caught(CatchOutcome),
    AlreadyCaught { by: u64 },
    Gone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatchOutcome {
    pub prompt: ActivePrompt,
    pub reward: CatchReward,
    pub progress: UserProgress,
    pub leveled_up: bool,
}

/// Try to catch `prompt_id` for `user_id`.
///
/// Only the first successful claim of a prompt touches the user's record;
/// every later attempt returns without mutating anything.
pub async fn catch_prompt(
    db: &Database,
    prompt_id: &str,
    user_id: u64,
    reward: CatchReward,
    now_ms: u64,
) -> anyhow::Result<CatchResult> {
    let prompt = match db.prompts().claim(prompt_id, user_id, now_ms).await {
        Claim::Won(prompt) => prompt,
        Claim::AlreadyCaught { by } => return Ok(CatchResult::AlreadyCaught { by }),
        Claim::Gone => return Ok(CatchResult::Gone),
    };

    let (progress, leveled_up) = db
        .users()
        .update(&user_id.to_string(), UserProgress::default, |progress| {
            let leveled_up = progress.apply_catch(reward);
            (progress.clone(), leveled_up)
        })
        .await?;

    info!(
        prompt_id = %prompt.id,
        guild_id = prompt.guild_id,
        user_id,
        coins = reward.coins,
        xp = reward.xp,
        level = progress.level,
        leveled_up,
        "crab caught"
    );

    Ok(CatchResult::Caught(CatchOutcome {
        prompt,
        reward,
        progress,
        leveled_up,
    }))
}
