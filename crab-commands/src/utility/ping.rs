use poise::serenity_prelude as serenity;

use crab_core::{Context, Error};
use crab_utils::formatting::LatencyQuality;

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Check gateway latency.",
    category: "utility",
    usage: "!ping",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency_ms = ctx.ping().await.as_millis();
    let quality = LatencyQuality::from_millis(latency_ms);

    let embed = serenity::CreateEmbed::new()
        .title("\u{1f3d3} Pong!")
        .color(quality.color())
        .field(
            "\u{1f4e1} Gateway Latency",
            format!("`{}ms`", latency_ms),
            true,
        )
        .field("\u{1f493} Heartbeat", "`Active`", true)
        .footer(serenity::CreateEmbedFooter::new(quality.footer()));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
