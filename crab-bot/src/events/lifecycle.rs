use poise::serenity_prelude as serenity;
use tracing::{debug, info, warn};

pub const PRESENCE_TEXT: &str = "for crabs \u{1f980}";

pub fn handle_ready(ctx: &serenity::Context, ready: &serenity::Ready) {
    info!(
        user = %ready.user.name,
        guilds = ready.guilds.len(),
        version = env!("CARGO_PKG_VERSION"),
        "crab bot is ready"
    );

    ctx.set_activity(Some(serenity::ActivityData::watching(PRESENCE_TEXT)));
}

pub fn handle_shard_stage(event: &serenity::ShardStageUpdateEvent) {
    match &event.new {
        serenity::ConnectionStage::Connected => {
            info!(shard_id = event.shard_id.0, "connected to gateway");
        }
        serenity::ConnectionStage::Disconnected => {
            warn!(shard_id = event.shard_id.0, "disconnected from gateway");
        }
        stage => {
            debug!(shard_id = event.shard_id.0, ?stage, "gateway stage changed");
        }
    }
}

pub fn handle_resumed() {
    info!("gateway session resumed");
}

pub fn handle_guild_create(guild: &serenity::Guild, is_new: Option<bool>) {
    if is_new == Some(true) {
        info!(guild_id = guild.id.get(), name = %guild.name, "joined guild");
    }
}

pub fn handle_guild_delete(incomplete: &serenity::UnavailableGuild) {
    if incomplete.unavailable {
        warn!(guild_id = incomplete.id.get(), "guild became unavailable");
    } else {
        info!(guild_id = incomplete.id.get(), "left guild");
    }
}
