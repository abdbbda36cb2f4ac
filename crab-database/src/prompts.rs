use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;

/// How long a posted prompt stays catchable.
pub const PROMPT_TIMEOUT: Duration = Duration::from_secs(300);
/// Every prompt id (and so every catch button custom id) starts with this.
pub const PROMPT_ID_PREFIX: &str = "crab_";

/// One posted catch opportunity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivePrompt {
    pub id: String,
    pub guild_id: u64,
    pub channel_id: u64,
    pub spawned_at_ms: u64,
    pub caught_by: Option<u64>,
}

impl ActivePrompt {
    fn expired_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.spawned_at_ms) >= PROMPT_TIMEOUT.as_millis() as u64
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Claim {
    /// The caller won the prompt.
    Won(ActivePrompt),
    /// Someone (possibly the caller) already caught it.
    AlreadyCaught { by: u64 },
    /// Unknown id, expired, or lost across a restart.
    Gone,
}

/// In-memory registry of open prompts.
///
/// `claim` is the single check-and-set that guarantees at most one winner per
/// prompt, regardless of how many presses arrive concurrently.
#[derive(Debug, Default)]
pub struct PromptRegistry {
    prompts: Mutex<HashMap<String, ActivePrompt>>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new prompt and return it. Expired entries are purged first.
    pub async fn open(&self, guild_id: u64, channel_id: u64, now_ms: u64) -> ActivePrompt {
        let mut prompts = self.prompts.lock().await;
        insert_prompt(&mut prompts, guild_id, channel_id, now_ms)
    }

    /// Like [`PromptRegistry::open`], but only if the guild has no uncaught
    /// prompt. The check and the insert share one lock, so concurrent callers
    /// cannot both succeed. On refusal the prompt already open is returned.
    pub async fn open_exclusive(
        &self,
        guild_id: u64,
        channel_id: u64,
        now_ms: u64,
    ) -> Result<ActivePrompt, ActivePrompt> {
        let mut prompts = self.prompts.lock().await;

        if let Some(open) = find_open(&prompts, guild_id, now_ms) {
            return Err(open.clone());
        }

        Ok(insert_prompt(&mut prompts, guild_id, channel_id, now_ms))
    }

    pub async fn claim(&self, prompt_id: &str, user_id: u64, now_ms: u64) -> Claim {
        let mut prompts = self.prompts.lock().await;

        let Some(prompt) = prompts.get_mut(prompt_id) else {
            return Claim::Gone;
        };

        if let Some(by) = prompt.caught_by {
            return Claim::AlreadyCaught { by };
        }

        if prompt.expired_at(now_ms) {
            return Claim::Gone;
        }

        prompt.caught_by = Some(user_id);
        Claim::Won(prompt.clone())
    }

    /// Drop a prompt whose message never made it to the channel.
    pub async fn discard(&self, prompt_id: &str) {
        self.prompts.lock().await.remove(prompt_id);
    }

    /// Remove every prompt belonging to a guild. Returns how many were removed.
    pub async fn close_guild(&self, guild_id: u64) -> usize {
        let mut prompts = self.prompts.lock().await;
        let before = prompts.len();
        prompts.retain(|_, prompt| prompt.guild_id != guild_id);
        before - prompts.len()
    }
}

fn insert_prompt(
    prompts: &mut HashMap<String, ActivePrompt>,
    guild_id: u64,
    channel_id: u64,
    now_ms: u64,
) -> ActivePrompt {
    prompts.retain(|_, prompt| !prompt.expired_at(now_ms));

    let mut stamp = now_ms;
    let mut id = prompt_id(guild_id, stamp);
    while prompts.contains_key(&id) {
        stamp += 1;
        id = prompt_id(guild_id, stamp);
    }

    let prompt = ActivePrompt {
        id: id.clone(),
        guild_id,
        channel_id,
        spawned_at_ms: now_ms,
        caught_by: None,
    };
    prompts.insert(id, prompt.clone());
    prompt
}

fn find_open(
    prompts: &HashMap<String, ActivePrompt>,
    guild_id: u64,
    now_ms: u64,
) -> Option<&ActivePrompt> {
    prompts.values().find(|prompt| {
        prompt.guild_id == guild_id && prompt.caught_by.is_none() && !prompt.expired_at(now_ms)
    })
}

fn prompt_id(guild_id: u64, stamp_ms: u64) -> String {
    format!("{PROMPT_ID_PREFIX}{guild_id}_{stamp_ms}")
}
