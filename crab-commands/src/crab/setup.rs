use poise::serenity_prelude as serenity;
use tracing::info;

use crate::CommandMeta;
use crate::crab::embeds::{
    appearance_period_label, guild_only_message, manage_guild_required_message,
};
use crab_core::{Context, Error};
use crab_database::impls::guild_config::set_spawn_channel;
use crab_utils::embed::SUCCESS_EMBED_COLOR;
use crab_utils::embed::notice;
use crab_utils::permissions::author_has_permission;

pub const META: CommandMeta = CommandMeta {
    name: "setup",
    desc: "Choose the channel where crabs appear and enable appearances.",
    category: "crab",
    usage: "!setup <#channel>",
};

/// Set up crab appearances in this server.
#[poise::command(prefix_command, slash_command, category = "Crab")]
pub async fn setup(
    ctx: Context<'_>,
    #[description = "Channel where crabs will appear"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !author_has_permission(ctx, serenity::Permissions::MANAGE_GUILD).await? {
        ctx.send(notice(manage_guild_required_message())).await?;
        return Ok(());
    }

    if channel.guild_id != guild_id {
        ctx.send(notice("That channel belongs to a different server."))
            .await?;
        return Ok(());
    }

    set_spawn_channel(&ctx.data().db, guild_id.get(), channel.id.get()).await?;
    info!(
        guild_id = guild_id.get(),
        channel_id = channel.id.get(),
        "crab appearances configured"
    );

    let embed = serenity::CreateEmbed::new()
        .title("\u{1f980} Crab Bot Setup Complete!")
        .description(format!(
            "Crab appearances enabled in <#{}>",
            channel.id.get()
        ))
        .color(SUCCESS_EMBED_COLOR)
        .field(
            "Crab Frequency",
            appearance_period_label(ctx.data().spawn_interval),
            true,
        )
        .field("Status", "\u{1f7e2} Enabled", true)
        .footer(serenity::CreateEmbedFooter::new(
            "Crabs will start appearing soon!",
        ));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
