use poise::serenity_prelude as serenity;

use crab_core::{Context, Error};
use crab_utils::embed::GATEWAY_EMBED_COLOR;
use crab_utils::formatting::{LatencyQuality, format_compact_duration};
use crab_utils::time::now_unix_secs;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "gateway_status",
    desc: "Show gateway connection health and bot uptime.",
    category: "utility",
    usage: "!gateway_status",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn gateway_status(ctx: Context<'_>) -> Result<(), Error> {
    let latency_ms = ctx.ping().await.as_millis();
    let quality = LatencyQuality::from_millis(latency_ms);
    let data = ctx.data();

    let uptime = format_compact_duration(now_unix_secs().saturating_sub(data.started_at));
    let route = if data.http_proxy.is_some() {
        "`Proxy`"
    } else {
        "`Direct`"
    };

    let embed = serenity::CreateEmbed::new()
        .title("\u{1f310} Gateway Status")
        .color(GATEWAY_EMBED_COLOR)
        .field(
            "\u{1f4e1} WebSocket Latency",
            format!("`{}ms`", latency_ms),
            true,
        )
        .field("\u{1f4ca} Connection Quality", quality.label(), true)
        .field(
            "\u{1f9e9} Shard",
            format!("`{}`", ctx.serenity_context().shard_id.0),
            true,
        )
        .field("\u{23f1}\u{fe0f} Uptime", uptime, true)
        .field(
            "\u{1f3e0} Servers",
            ctx.serenity_context().cache.guild_count().to_string(),
            true,
        )
        .field("\u{1f50c} HTTP Route", route, true)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Crab Bot v{}",
            env!("CARGO_PKG_VERSION")
        )));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
