use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crab_commands::crab::embeds::PromptCard;
use crab_database::Database;
use crab_database::impls::guild_config::spawn_targets;
use crab_utils::time::now_unix_millis;

/// Where the scheduler delivers prompts. The serenity adapter is the only
/// production implementation.
pub trait PromptSink: Send + Sync {
    fn send_prompt(
        &self,
        channel_id: u64,
        prompt_id: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

pub struct SerenityPromptSink {
    http: Arc<serenity::Http>,
}

impl SerenityPromptSink {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

impl PromptSink for SerenityPromptSink {
    async fn send_prompt(&self, channel_id: u64, prompt_id: &str) -> anyhow::Result<()> {
        let card = PromptCard::new(
            &mut rand::thread_rng(),
            prompt_id,
            "Crab Bot \u{2022} Auto-spawn",
        );

        serenity::ChannelId::new(channel_id)
            .send_message(self.http.as_ref(), card.into_message())
            .await?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SpawnerSettings {
    pub period: Duration,
    pub chance: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// One pass over every enabled guild.
///
/// A failed send only affects its own guild: the prompt is discarded, the
/// failure is logged, and the pass moves on.
pub async fn run_tick<S, R>(
    db: &Database,
    sink: &S,
    chance: f64,
    rng: &mut R,
    now_ms: u64,
) -> TickReport
where
    S: PromptSink,
    R: Rng + Send,
{
    let mut report = TickReport::default();

    for (guild_id, channel_id) in spawn_targets(db).await {
        if !rng.gen_bool(chance) {
            report.skipped += 1;
            continue;
        }

        let prompt = db.prompts().open(guild_id, channel_id, now_ms).await;

        match sink.send_prompt(channel_id, &prompt.id).await {
            Ok(()) => {
                debug!(guild_id, channel_id, prompt_id = %prompt.id, "crab appeared");
                report.spawned += 1;
            }
            Err(source) => {
                warn!(?source, guild_id, channel_id, "failed to send crab appearance");
                db.prompts().discard(&prompt.id).await;
                report.failed += 1;
            }
        }
    }

    report
}

/// Running scheduler task. Dropping the handle leaves the task running;
/// call [`SpawnerHandle::stop`] to end it.
pub struct SpawnerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SpawnerHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(source) = self.task.await {
            warn!(?source, "crab spawner task ended abnormally");
        }
    }
}

/// Start the repeating appearance task. The first tick fires one full period
/// after start; late ticks are delayed rather than bunched up.
pub fn start<S>(db: Database, sink: S, settings: SpawnerSettings) -> SpawnerHandle
where
    S: PromptSink + 'static,
{
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + settings.period, settings.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut rng = StdRng::from_entropy();

        info!(
            period_secs = settings.period.as_secs(),
            chance = settings.chance,
            "crab spawner started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = shutdown_rx.changed() => break,
            }

            let report = run_tick(&db, &sink, settings.chance, &mut rng, now_unix_millis()).await;
            if report.spawned + report.failed > 0 {
                info!(
                    spawned = report.spawned,
                    skipped = report.skipped,
                    failed = report.failed,
                    "crab spawner tick"
                );
            }
        }

        info!("crab spawner stopped");
    });

    SpawnerHandle { shutdown, task }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crab_database::Database;
    use crab_database::impls::guild_config::{disable_spawning, set_spawn_channel};
    use crab_database::prompts::Claim;

    use super::{PromptSink, SpawnerSettings, TickReport, run_tick, start};

    const T0: u64 = 1_700_000_000_000;

    static NEXT_DIR: AtomicU64 = AtomicU64::new(0);

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "crab-spawner-{}-{}-{}",
            label,
            std::process::id(),
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(u64, String)>>,
        broken_channel: Option<u64>,
    }

    impl RecordingSink {
        fn broken(channel_id: u64) -> Self {
            Self {
                broken_channel: Some(channel_id),
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<(u64, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl PromptSink for RecordingSink {
        async fn send_prompt(&self, channel_id: u64, prompt_id: &str) -> anyhow::Result<()> {
            if self.broken_channel == Some(channel_id) {
                anyhow::bail!("missing access to channel {channel_id}");
            }
            self.sent
                .lock()
                .unwrap()
                .push((channel_id, prompt_id.to_owned()));
            Ok(())
        }
    }

    impl PromptSink for std::sync::Arc<RecordingSink> {
        async fn send_prompt(&self, channel_id: u64, prompt_id: &str) -> anyhow::Result<()> {
            self.as_ref().send_prompt(channel_id, prompt_id).await
        }
    }

    #[tokio::test]
    async fn disabled_guild_never_gets_a_crab() {
        let db = Database::open(scratch_dir("disabled")).await.unwrap();
        set_spawn_channel(&db, 1, 11).await.unwrap();
        disable_spawning(&db, 1).await.unwrap();

        let sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(1);
        for tick in 0..100 {
            run_tick(&db, &sink, 1.0, &mut rng, T0 + tick).await;
        }

        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn certain_chance_hits_every_enabled_guild() {
        let db = Database::open(scratch_dir("certain")).await.unwrap();
        set_spawn_channel(&db, 1, 11).await.unwrap();
        set_spawn_channel(&db, 2, 22).await.unwrap();

        let sink = RecordingSink::default();
        let report = run_tick(&db, &sink, 1.0, &mut StdRng::seed_from_u64(2), T0).await;

        assert_eq!(
            report,
            TickReport {
                spawned: 2,
                skipped: 0,
                failed: 0
            }
        );
        let sent = sink.sent();
        assert_eq!(sent[0], (11, format!("crab_1_{T0}")));
        assert_eq!(sent[1], (22, format!("crab_2_{T0}")));
    }

    #[tokio::test]
    async fn zero_chance_skips() {
        let db = Database::open(scratch_dir("zero")).await.unwrap();
        set_spawn_channel(&db, 1, 11).await.unwrap();

        let sink = RecordingSink::default();
        let report = run_tick(&db, &sink, 0.0, &mut StdRng::seed_from_u64(3), T0).await;

        assert_eq!(report.skipped, 1);
        assert!(sink.sent().is_empty());
    }

    #[tokio::test]
    async fn chance_is_roughly_respected() {
        let db = Database::open(scratch_dir("ratio")).await.unwrap();
        set_spawn_channel(&db, 1, 11).await.unwrap();

        let sink = RecordingSink::default();
        let mut rng = StdRng::seed_from_u64(4);
        for tick in 0..1_000 {
            run_tick(&db, &sink, 0.7, &mut rng, T0 + tick * 1_000_000).await;
        }

        let spawned = sink.sent().len();
        assert!((600..=800).contains(&spawned), "spawned {spawned} of 1000");
    }

    #[tokio::test]
    async fn failed_send_is_contained_and_discarded() {
        let db = Database::open(scratch_dir("broken")).await.unwrap();
        set_spawn_channel(&db, 1, 11).await.unwrap();
        set_spawn_channel(&db, 2, 22).await.unwrap();

        let sink = RecordingSink::broken(11);
        let report = run_tick(&db, &sink, 1.0, &mut StdRng::seed_from_u64(5), T0).await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.spawned, 1);
        assert_eq!(sink.sent(), vec![(22, format!("crab_2_{T0}"))]);
        assert_eq!(
            db.prompts().claim(&format!("crab_1_{T0}"), 9, T0).await,
            Claim::Gone
        );
    }

    #[tokio::test(start_paused = true)]
    async fn spawner_ticks_on_period_and_stops() {
        let db = Database::open(scratch_dir("loop")).await.unwrap();
        set_spawn_channel(&db, 1, 11).await.unwrap();

        let period = Duration::from_secs(600);
        let sink = std::sync::Arc::new(RecordingSink::default());
        let handle = start(
            db.clone(),
            sink.clone(),
            SpawnerSettings {
                period,
                chance: 1.0,
            },
        );

        tokio::time::sleep(period / 2).await;
        assert!(sink.sent().is_empty());

        tokio::time::sleep(period * 3).await;
        assert_eq!(sink.sent().len(), 3);

        handle.stop().await;
        tokio::time::sleep(period * 3).await;
        assert_eq!(sink.sent().len(), 3);
    }
}
